use crate::domain::doctor::{cmp_ignore_case, Doctor};
use crate::utils::error::{RosterError, Result};
use chrono::NaiveTime;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SortKey {
    Name,
    Specialization,
    Fee,
}

impl SortKey {
    pub fn comparator(self) -> fn(&Doctor, &Doctor) -> Ordering {
        match self {
            SortKey::Name => Doctor::compare_by_name,
            SortKey::Specialization => Doctor::compare_by_specialization,
            SortKey::Fee => Doctor::compare_by_fee,
        }
    }
}

/// Doctors kept in insertion order, unique by id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    doctors: Vec<Doctor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, doctor: Doctor) -> Result<()> {
        if self.doctors.contains(&doctor) {
            return Err(RosterError::DuplicateDoctor {
                doctor_id: doctor.doctor_id().to_string(),
            });
        }
        tracing::debug!(doctor_id = doctor.doctor_id(), "doctor added to roster");
        self.doctors.push(doctor);
        Ok(())
    }

    pub fn find(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.doctor_id() == doctor_id)
    }

    pub fn find_mut(&mut self, doctor_id: &str) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| d.doctor_id() == doctor_id)
    }

    pub fn contains(&self, doctor_id: &str) -> bool {
        self.find(doctor_id).is_some()
    }

    pub fn remove(&mut self, doctor_id: &str) -> Option<Doctor> {
        let index = self
            .doctors
            .iter()
            .position(|d| d.doctor_id() == doctor_id)?;
        tracing::debug!(doctor_id, "doctor removed from roster");
        Some(self.doctors.remove(index))
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.iter()
    }

    /// Stable sort, so ties keep roster order.
    pub fn sorted_by(&self, key: SortKey) -> Vec<&Doctor> {
        self.list(None, key)
    }

    /// Optionally narrowed to one specialization, then sorted by `key`.
    pub fn list(&self, specialization: Option<&str>, key: SortKey) -> Vec<&Doctor> {
        let mut doctors = match specialization {
            Some(label) => self.by_specialization(label),
            None => self.doctors.iter().collect(),
        };
        let compare = key.comparator();
        doctors.sort_by(|a, b| compare(a, b));
        doctors
    }

    pub fn by_specialization(&self, specialization: &str) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| cmp_ignore_case(d.specialization(), specialization) == Ordering::Equal)
            .collect()
    }

    /// Doctors who work on `day`, are on shift at `time` and still have room today.
    pub fn available_at(&self, day: &str, time: NaiveTime) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| {
                d.is_working_today(day)
                    && d.is_within_working_hours(time)
                    && d.can_take_more_patients()
            })
            .collect()
    }

    /// Books one patient and returns the doctor's new count.
    pub fn book(&mut self, doctor_id: &str) -> Result<i32> {
        let doctor = self.lookup_mut(doctor_id)?;
        if !doctor.can_take_more_patients() {
            tracing::warn!(doctor_id, "booking refused, no capacity");
            return Err(RosterError::NoCapacity {
                doctor_id: doctor_id.to_string(),
            });
        }
        doctor.increment_patient_count();
        Ok(doctor.current_patient_count())
    }

    pub fn release(&mut self, doctor_id: &str) -> Result<i32> {
        let doctor = self.lookup_mut(doctor_id)?;
        doctor.decrement_patient_count();
        Ok(doctor.current_patient_count())
    }

    pub fn reset_daily_counts(&mut self) {
        for doctor in &mut self.doctors {
            doctor.set_current_patient_count(0);
        }
        tracing::info!(doctors = self.doctors.len(), "daily patient counts reset");
    }

    fn lookup_mut(&mut self, doctor_id: &str) -> Result<&mut Doctor> {
        self.find_mut(doctor_id)
            .ok_or_else(|| RosterError::DoctorNotFound {
                doctor_id: doctor_id.to_string(),
            })
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Doctor;
    type IntoIter = std::slice::Iter<'a, Doctor>;

    fn into_iter(self) -> Self::IntoIter {
        self.doctors.iter()
    }
}
