//! Departments and the wards they own.

use std::{fmt, num::NonZeroU32, str::FromStr};

use super::id::{DepartmentId, DoctorId};

/// A ward number: a positive integer identifying a ward within its
/// department.
///
/// Ward numbers are unique within a department but carry no global meaning;
/// two departments may both have a ward 101.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WardNumber(NonZeroU32);

impl WardNumber {
    /// Creates a ward number from a raw value, rejecting zero.
    #[must_use]
    pub const fn new(number: u32) -> Option<Self> {
        match NonZeroU32::new(number) {
            Some(number) => Some(Self(number)),
            None => None,
        }
    }

    /// Returns the number as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for WardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WardNumber {
    type Err = ParseWardNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .parse::<NonZeroU32>()
            .map_err(|_| ParseWardNumberError(s.to_string()))?;
        Ok(Self(number))
    }
}

/// Error returned when a string is not a valid ward number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid ward number '{0}': expected a positive integer")]
pub struct ParseWardNumberError(String);

/// A ward: a numbered room inside a department.
///
/// The ward stores the identifiers of the doctors assigned to it, in
/// assignment order. It does not own the doctors; the mirror set lives on
/// each [`Doctor`](crate::Doctor) and the two are kept consistent by the
/// registry's assignment operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ward {
    number: WardNumber,
    doctor_ids: Vec<DoctorId>,
}

impl Ward {
    pub(crate) const fn new(number: WardNumber) -> Self {
        Self {
            number,
            doctor_ids: Vec::new(),
        }
    }

    /// The ward's number.
    #[must_use]
    pub const fn number(&self) -> WardNumber {
        self.number
    }

    /// Identifiers of the doctors assigned to this ward, in assignment
    /// order.
    #[must_use]
    pub fn doctors(&self) -> &[DoctorId] {
        &self.doctor_ids
    }

    /// Whether the given doctor is already assigned to this ward.
    #[must_use]
    pub fn has_doctor(&self, doctor: DoctorId) -> bool {
        self.doctor_ids.contains(&doctor)
    }

    pub(crate) fn assign(&mut self, doctor: DoctorId) {
        self.doctor_ids.push(doctor);
    }
}

/// A hospital department owning an ordered set of wards.
///
/// Wards have no existence outside their department; looking one up always
/// goes through the owning department first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    id: DepartmentId,
    name: String,
    wards: Vec<Ward>,
}

impl Department {
    pub(crate) fn new(id: DepartmentId, name: String, wards: Vec<Ward>) -> Self {
        Self { id, name, wards }
    }

    /// The department's unique identifier.
    #[must_use]
    pub const fn id(&self) -> DepartmentId {
        self.id
    }

    /// The department's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The department's wards, in creation order.
    #[must_use]
    pub fn wards(&self) -> &[Ward] {
        &self.wards
    }

    /// Looks up a ward by number.
    ///
    /// A linear scan: departments hold a handful of wards.
    #[must_use]
    pub fn ward(&self, number: WardNumber) -> Option<&Ward> {
        self.wards.iter().find(|ward| ward.number() == number)
    }

    pub(crate) fn ward_mut(&mut self, number: WardNumber) -> Option<&mut Ward> {
        self.wards.iter_mut().find(|ward| ward.number() == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ward_number(number: u32) -> WardNumber {
        WardNumber::new(number).unwrap()
    }

    #[test]
    fn ward_number_rejects_zero() {
        assert!(WardNumber::new(0).is_none());
        assert!("0".parse::<WardNumber>().is_err());
        assert!("-1".parse::<WardNumber>().is_err());
    }

    #[test]
    fn ward_lookup_by_number() {
        let id = "1".parse().unwrap();
        let wards = vec![Ward::new(ward_number(101)), Ward::new(ward_number(102))];
        let department = Department::new(id, "Cardiology".to_string(), wards);

        assert_eq!(
            department.ward(ward_number(102)).map(Ward::number),
            Some(ward_number(102))
        );
        assert!(department.ward(ward_number(999)).is_none());
    }
}
