/// Index of a country in its [`crate::World`], stable for the world's lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId(pub u32);

impl CountryId {
    pub fn index(&self) -> u32 {
        self.0
    }
}
