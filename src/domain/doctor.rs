use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

pub const DEFAULT_MAX_PATIENTS_PER_DAY: i32 = 20;

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

fn default_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default()
}

/// A doctor's profile together with the live booking counter for the current day.
///
/// Identity is the `doctor_id` alone: `PartialEq` and `Hash` ignore every other field.
/// None of the operations fail; out-of-range requests are silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Doctor {
    doctor_id: String,
    name: String,
    specialization: String,
    contact_number: String,
    email: String,
    consultation_fee: f64,
    is_available: bool,
    working_days: Vec<String>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    max_patients_per_day: i32,
    current_patient_count: i32,
}

impl Default for Doctor {
    fn default() -> Self {
        Self {
            doctor_id: String::new(),
            name: String::new(),
            specialization: String::new(),
            contact_number: String::new(),
            email: String::new(),
            consultation_fee: 0.0,
            is_available: true,
            working_days: Vec::new(),
            start_time: Some(default_start_time()),
            end_time: Some(default_end_time()),
            max_patients_per_day: DEFAULT_MAX_PATIENTS_PER_DAY,
            current_patient_count: 0,
        }
    }
}

impl Doctor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default schedule and capacity with the four identity fields filled in.
    pub fn with_identity(
        doctor_id: impl Into<String>,
        name: impl Into<String>,
        specialization: impl Into<String>,
        contact_number: impl Into<String>,
    ) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            name: name.into(),
            specialization: specialization.into(),
            contact_number: contact_number.into(),
            ..Self::default()
        }
    }

    /// Fully specified record. Availability starts on and the patient counter at zero;
    /// `working_days` is copied, so later changes to the caller's slice are not seen.
    #[allow(clippy::too_many_arguments)]
    pub fn with_schedule<S: AsRef<str>>(
        doctor_id: impl Into<String>,
        name: impl Into<String>,
        specialization: impl Into<String>,
        contact_number: impl Into<String>,
        email: impl Into<String>,
        consultation_fee: f64,
        working_days: &[S],
        start_time: impl Into<Option<NaiveTime>>,
        end_time: impl Into<Option<NaiveTime>>,
        max_patients_per_day: i32,
    ) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            name: name.into(),
            specialization: specialization.into(),
            contact_number: contact_number.into(),
            email: email.into(),
            consultation_fee,
            is_available: true,
            working_days: copy_days(working_days),
            start_time: start_time.into(),
            end_time: end_time.into(),
            max_patients_per_day,
            current_patient_count: 0,
        }
    }

    pub fn doctor_id(&self) -> &str {
        &self.doctor_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    pub fn contact_number(&self) -> &str {
        &self.contact_number
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn consultation_fee(&self) -> f64 {
        self.consultation_fee
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Returns an owned copy of the working days.
    pub fn working_days(&self) -> Vec<String> {
        self.working_days.clone()
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }

    pub fn max_patients_per_day(&self) -> i32 {
        self.max_patients_per_day
    }

    pub fn current_patient_count(&self) -> i32 {
        self.current_patient_count
    }

    pub fn set_doctor_id(&mut self, doctor_id: impl Into<String>) {
        self.doctor_id = doctor_id.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_specialization(&mut self, specialization: impl Into<String>) {
        self.specialization = specialization.into();
    }

    pub fn set_contact_number(&mut self, contact_number: impl Into<String>) {
        self.contact_number = contact_number.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_consultation_fee(&mut self, consultation_fee: f64) {
        self.consultation_fee = consultation_fee;
    }

    pub fn set_available(&mut self, available: bool) {
        self.is_available = available;
    }

    pub fn set_working_days<S: AsRef<str>>(&mut self, working_days: &[S]) {
        self.working_days = copy_days(working_days);
    }

    pub fn set_start_time(&mut self, start_time: impl Into<Option<NaiveTime>>) {
        self.start_time = start_time.into();
    }

    pub fn set_end_time(&mut self, end_time: impl Into<Option<NaiveTime>>) {
        self.end_time = end_time.into();
    }

    pub fn set_max_patients_per_day(&mut self, max_patients_per_day: i32) {
        self.max_patients_per_day = max_patients_per_day;
    }

    /// Raw assignment. Unlike [`Doctor::increment_patient_count`] this is not clamped to
    /// `[0, max_patients_per_day]`.
    pub fn set_current_patient_count(&mut self, current_patient_count: i32) {
        self.current_patient_count = current_patient_count;
    }

    pub fn can_take_more_patients(&self) -> bool {
        self.current_patient_count < self.max_patients_per_day && self.is_available
    }

    pub fn increment_patient_count(&mut self) {
        if self.can_take_more_patients() {
            self.current_patient_count += 1;
        } else {
            tracing::trace!(
                doctor_id = %self.doctor_id,
                count = self.current_patient_count,
                max = self.max_patients_per_day,
                available = self.is_available,
                "increment ignored"
            );
        }
    }

    pub fn decrement_patient_count(&mut self) {
        if self.current_patient_count > 0 {
            self.current_patient_count -= 1;
        } else {
            tracing::trace!(doctor_id = %self.doctor_id, "decrement ignored at zero");
        }
    }

    pub fn is_working_today(&self, day: &str) -> bool {
        self.working_days
            .iter()
            .any(|working_day| eq_ignore_case(working_day, day))
    }

    /// Both bounds are inclusive. False when either bound is unset.
    pub fn is_within_working_hours(&self, time: NaiveTime) -> bool {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => start <= time && time <= end,
            _ => false,
        }
    }

    /// Length of the working window in hours, negative when `end_time < start_time`.
    pub fn calculate_working_hours(&self) -> f64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                let seconds = end.num_seconds_from_midnight() as i64
                    - start.num_seconds_from_midnight() as i64;
                seconds as f64 / 3600.0
            }
            _ => 0.0,
        }
    }

    pub fn compare_by_name(&self, other: &Doctor) -> Ordering {
        cmp_ignore_case(&self.name, &other.name)
    }

    pub fn compare_by_specialization(&self, other: &Doctor) -> Ordering {
        cmp_ignore_case(&self.specialization, &other.specialization)
    }

    /// Numeric order with `-0.0 < 0.0`; every NaN sorts after all numbers and equal to
    /// any other NaN, whatever its sign bit.
    pub fn compare_by_fee(&self, other: &Doctor) -> Ordering {
        let (a, b) = (self.consultation_fee, other.consultation_fee);
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.total_cmp(&b),
        }
    }
}

fn copy_days<S: AsRef<str>>(days: &[S]) -> Vec<String> {
    days.iter().map(|day| day.as_ref().to_string()).collect()
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    fold(a).eq(fold(b))
}

pub(crate) fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    fold(a).cmp(fold(b))
}

struct TimeOfDay(Option<NaiveTime>);

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("none"),
            Some(t) if t.second() == 0 && t.nanosecond() == 0 => {
                write!(f, "{}", t.format("%H:%M"))
            }
            Some(t) if t.nanosecond() == 0 => write!(f, "{}", t.format("%H:%M:%S")),
            Some(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
        }
    }
}

/// One-line summary for logs. An unset time bound prints as `none`.
impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Doctor{{ID='{}', Name='{}', Specialization='{}', Contact='{}', Email='{}', \
             Fee={:.2}, Available={}, WorkingDays=[{}], Hours={}-{}, Patients={}/{}}}",
            self.doctor_id,
            self.name,
            self.specialization,
            self.contact_number,
            self.email,
            self.consultation_fee,
            self.is_available,
            self.working_days.join(", "),
            TimeOfDay(self.start_time),
            TimeOfDay(self.end_time),
            self.current_patient_count,
            self.max_patients_per_day,
        )
    }
}

impl PartialEq for Doctor {
    fn eq(&self, other: &Self) -> bool {
        self.doctor_id == other.doctor_id
    }
}

impl Eq for Doctor {}

impl Hash for Doctor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.doctor_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn hash_of(doctor: &Doctor) -> u64 {
        let mut hasher = DefaultHasher::new();
        doctor.hash(&mut hasher);
        hasher.finish()
    }

    fn cardiologist() -> Doctor {
        Doctor::with_schedule(
            "D7",
            "Grace",
            "Cardiology",
            "555-0107",
            "grace@clinic.test",
            120.0,
            &["Monday", "Wednesday"],
            hms(8, 30, 0),
            hms(16, 0, 0),
            3,
        )
    }

    #[test]
    fn test_default_record() {
        let doctor = Doctor::new();
        assert_eq!(doctor.doctor_id(), "");
        assert_eq!(doctor.name(), "");
        assert_eq!(doctor.email(), "");
        assert_eq!(doctor.consultation_fee(), 0.0);
        assert!(doctor.is_available());
        assert!(doctor.working_days().is_empty());
        assert_eq!(doctor.start_time(), Some(hms(9, 0, 0)));
        assert_eq!(doctor.end_time(), Some(hms(17, 0, 0)));
        assert_eq!(doctor.max_patients_per_day(), 20);
        assert_eq!(doctor.current_patient_count(), 0);
    }

    #[test]
    fn test_identity_constructor_keeps_defaults() {
        let doctor = Doctor::with_identity("D1", "Alice", "Cardiology", "555-0100");
        assert_eq!(doctor.doctor_id(), "D1");
        assert_eq!(doctor.name(), "Alice");
        assert_eq!(doctor.specialization(), "Cardiology");
        assert_eq!(doctor.contact_number(), "555-0100");
        assert_eq!(doctor.email(), "");
        assert_eq!(doctor.max_patients_per_day(), 20);
        assert_eq!(doctor.calculate_working_hours(), 8.0);
    }

    #[test]
    fn test_full_constructor_copies_days() {
        let mut days = vec!["Monday".to_string(), "Friday".to_string()];
        let doctor = Doctor::with_schedule(
            "D2",
            "Bob",
            "Dermatology",
            "555-0101",
            "bob@clinic.test",
            80.0,
            &days,
            hms(10, 0, 0),
            hms(14, 0, 0),
            5,
        );
        days[0] = "Sunday".to_string();
        days.push("Saturday".to_string());

        assert_eq!(doctor.working_days(), vec!["Monday", "Friday"]);
        assert!(doctor.is_available());
        assert_eq!(doctor.current_patient_count(), 0);
    }

    #[test]
    fn test_full_constructor_with_empty_days_and_no_times() {
        let no_days: Vec<String> = Vec::new();
        let doctor = Doctor::with_schedule(
            "D3", "Cy", "ENT", "", "", 0.0, &no_days, None, None, 10,
        );
        assert!(doctor.working_days().is_empty());
        assert!(!doctor.is_working_today("Monday"));
        assert!(!doctor.is_within_working_hours(hms(12, 0, 0)));
        assert_eq!(doctor.calculate_working_hours(), 0.0);
    }

    #[test]
    fn test_working_days_getter_returns_copy() {
        let mut doctor = Doctor::new();
        doctor.set_working_days(&["Tuesday"]);

        let mut copy = doctor.working_days();
        copy.push("Thursday".to_string());
        copy[0] = "Sunday".to_string();

        assert_eq!(doctor.working_days(), vec!["Tuesday"]);
    }

    #[test]
    fn test_increment_stops_at_capacity() {
        let mut doctor = Doctor::with_identity("D1", "Alice", "Cardiology", "555-0100");
        for _ in 0..20 {
            doctor.increment_patient_count();
        }
        assert_eq!(doctor.current_patient_count(), 20);
        assert!(!doctor.can_take_more_patients());

        doctor.increment_patient_count();
        assert_eq!(doctor.current_patient_count(), 20);
    }

    #[test]
    fn test_increment_ignored_when_unavailable() {
        let mut doctor = cardiologist();
        doctor.set_available(false);
        assert!(!doctor.can_take_more_patients());

        doctor.increment_patient_count();
        assert_eq!(doctor.current_patient_count(), 0);
    }

    #[test]
    fn test_zero_capacity() {
        let mut doctor = Doctor::with_schedule(
            "D4", "Dee", "Oncology", "", "", 0.0, &["Monday"], hms(9, 0, 0), hms(10, 0, 0), 0,
        );
        assert!(!doctor.can_take_more_patients());
        doctor.increment_patient_count();
        assert_eq!(doctor.current_patient_count(), 0);
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let mut doctor = cardiologist();
        doctor.increment_patient_count();
        doctor.decrement_patient_count();
        doctor.decrement_patient_count();
        assert_eq!(doctor.current_patient_count(), 0);
    }

    #[test]
    fn test_counter_stays_in_bounds_for_mixed_sequence() {
        let mut doctor = cardiologist();
        let ops = [1, 1, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        for op in ops {
            if op == 1 {
                doctor.increment_patient_count();
            } else {
                doctor.decrement_patient_count();
            }
            let count = doctor.current_patient_count();
            assert!((0..=doctor.max_patients_per_day()).contains(&count));
        }
        assert_eq!(doctor.current_patient_count(), 3);
    }

    #[test]
    fn test_raw_counter_setter_is_unchecked() {
        let mut doctor = cardiologist();
        doctor.set_current_patient_count(50);
        assert_eq!(doctor.current_patient_count(), 50);
        assert!(!doctor.can_take_more_patients());

        doctor.set_current_patient_count(-2);
        assert_eq!(doctor.current_patient_count(), -2);
        doctor.decrement_patient_count();
        assert_eq!(doctor.current_patient_count(), -2);
    }

    #[test]
    fn test_is_working_today_ignores_case() {
        let doctor = cardiologist();
        assert!(doctor.is_working_today("monday"));
        assert!(doctor.is_working_today("MONDAY"));
        assert!(doctor.is_working_today("wEdNeSdAy"));
        assert!(!doctor.is_working_today("Tuesday"));
        assert!(!doctor.is_working_today(""));
    }

    #[test]
    fn test_working_hours_are_inclusive() {
        let doctor = cardiologist();
        assert!(doctor.is_within_working_hours(hms(8, 30, 0)));
        assert!(doctor.is_within_working_hours(hms(16, 0, 0)));
        assert!(doctor.is_within_working_hours(hms(12, 15, 0)));
        assert!(!doctor.is_within_working_hours(hms(8, 29, 59)));
        assert!(!doctor.is_within_working_hours(hms(16, 0, 1)));
    }

    #[test]
    fn test_working_hours_unset_bound() {
        let mut doctor = cardiologist();
        doctor.set_end_time(None);
        assert!(!doctor.is_within_working_hours(hms(9, 0, 0)));
        assert_eq!(doctor.calculate_working_hours(), 0.0);
    }

    #[test]
    fn test_calculate_working_hours() {
        let mut doctor = Doctor::new();
        assert_eq!(doctor.calculate_working_hours(), 8.0);

        doctor.set_start_time(hms(8, 30, 0));
        doctor.set_end_time(hms(12, 45, 0));
        assert_eq!(doctor.calculate_working_hours(), 4.25);
    }

    #[test]
    fn test_inverted_range_gives_negative_hours() {
        let mut doctor = Doctor::new();
        doctor.set_start_time(hms(22, 0, 0));
        doctor.set_end_time(hms(6, 0, 0));
        assert_eq!(doctor.calculate_working_hours(), -16.0);
        assert!(!doctor.is_within_working_hours(hms(23, 0, 0)));
    }

    #[test]
    fn test_equality_and_hash_use_id_only() {
        let a = Doctor::with_identity("D1", "Alice", "Cardiology", "555-0100");
        let b = Doctor::with_identity("D1", "Alicia", "Neurology", "555-0199");
        let c = Doctor::with_identity("D2", "Alice", "Cardiology", "555-0100");

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);

        let set: HashSet<Doctor> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_comparators() {
        let mut alice = Doctor::with_identity("D1", "alice", "neurology", "");
        let mut bob = Doctor::with_identity("D2", "Bob", "Cardiology", "");
        alice.set_consultation_fee(200.0);
        bob.set_consultation_fee(90.5);

        assert_eq!(alice.compare_by_name(&bob), Ordering::Less);
        assert_eq!(alice.compare_by_specialization(&bob), Ordering::Greater);
        assert_eq!(alice.compare_by_fee(&bob), Ordering::Greater);

        let upper = Doctor::with_identity("D3", "ALICE", "NEUROLOGY", "");
        assert_eq!(alice.compare_by_name(&upper), Ordering::Equal);
        assert_eq!(alice.compare_by_specialization(&upper), Ordering::Equal);
    }

    #[test]
    fn test_fee_order_puts_nan_last() {
        let fee = |f: f64| {
            let mut doctor = Doctor::new();
            doctor.set_consultation_fee(f);
            doctor
        };
        let nan = fee(f64::NAN);
        let negative_nan = fee(-f64::NAN);

        assert_eq!(negative_nan.compare_by_fee(&fee(-1000.0)), Ordering::Greater);
        assert_eq!(fee(f64::INFINITY).compare_by_fee(&nan), Ordering::Less);
        assert_eq!(nan.compare_by_fee(&negative_nan), Ordering::Equal);
        assert_eq!(fee(-0.0).compare_by_fee(&fee(0.0)), Ordering::Less);
        assert_eq!(fee(10.0).compare_by_fee(&fee(10.0)), Ordering::Equal);
    }

    #[test]
    fn test_comparators_drive_sort() {
        let mut doctors = vec![
            Doctor::with_identity("D1", "carol", "", ""),
            Doctor::with_identity("D2", "Alice", "", ""),
            Doctor::with_identity("D3", "bob", "", ""),
        ];
        doctors.sort_by(Doctor::compare_by_name);
        let ids: Vec<&str> = doctors.iter().map(Doctor::doctor_id).collect();
        assert_eq!(ids, ["D2", "D3", "D1"]);
    }

    #[test]
    fn test_display() {
        let mut doctor = cardiologist();
        doctor.increment_patient_count();
        assert_eq!(
            doctor.to_string(),
            "Doctor{ID='D7', Name='Grace', Specialization='Cardiology', Contact='555-0107', \
             Email='grace@clinic.test', Fee=120.00, Available=true, \
             WorkingDays=[Monday, Wednesday], Hours=08:30-16:00, Patients=1/3}"
        );

        doctor.set_start_time(hms(8, 30, 15));
        doctor.set_end_time(None);
        assert!(doctor.to_string().contains("Hours=08:30:15-none"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let doctor: Doctor =
            serde_json::from_str(r#"{"doctorId":"D9","name":"Ines","workingDays":["Friday"]}"#)
                .unwrap();
        assert_eq!(doctor.doctor_id(), "D9");
        assert!(doctor.is_available());
        assert_eq!(doctor.max_patients_per_day(), 20);
        assert_eq!(doctor.start_time(), Some(hms(9, 0, 0)));
        assert!(doctor.is_working_today("friday"));
    }
}
