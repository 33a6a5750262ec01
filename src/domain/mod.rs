// Domain layer: the doctor record and the in-memory roster built from it.

pub mod doctor;
pub mod roster;
