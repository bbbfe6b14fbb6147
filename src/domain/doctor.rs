//! Doctors and their ward assignments.

use super::{
    department::WardNumber,
    id::DoctorId,
    person::{BirthYear, PersonName},
};

/// Intake record for registering a new doctor.
///
/// The registry validates the birth year and allocates the identifier; the
/// remaining fields are stored as given.
#[derive(Debug, Clone)]
pub struct NewDoctor {
    /// Full name.
    pub name: PersonName,
    /// Raw birth year, validated on registration.
    pub birth_year: i32,
    /// Position held, e.g. "cardiologist".
    pub position: String,
    /// Contact phone number.
    pub phone: String,
}

/// A registered doctor.
///
/// The doctor's ward-number list is the mirror side of each ward's doctor
/// list; the registry updates both together and never exposes a way to
/// change one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    id: DoctorId,
    name: PersonName,
    birth_year: BirthYear,
    position: String,
    phone: String,
    ward_numbers: Vec<WardNumber>,
}

impl Doctor {
    pub(crate) const fn new(
        id: DoctorId,
        name: PersonName,
        birth_year: BirthYear,
        position: String,
        phone: String,
    ) -> Self {
        Self {
            id,
            name,
            birth_year,
            position,
            phone,
            ward_numbers: Vec::new(),
        }
    }

    /// The doctor's unique identifier.
    #[must_use]
    pub const fn id(&self) -> DoctorId {
        self.id
    }

    /// The doctor's full name.
    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// The doctor's birth year.
    #[must_use]
    pub const fn birth_year(&self) -> BirthYear {
        self.birth_year
    }

    /// The doctor's position.
    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }

    /// The doctor's contact phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Numbers of the wards this doctor is assigned to, in assignment
    /// order.
    #[must_use]
    pub fn wards(&self) -> &[WardNumber] {
        &self.ward_numbers
    }

    pub(crate) fn add_ward(&mut self, number: WardNumber) {
        self.ward_numbers.push(number);
    }
}
