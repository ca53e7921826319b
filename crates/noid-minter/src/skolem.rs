use uuid::Uuid;

const GENID_PATH: &str = "/.well-known/genid/";

/// Mints Skolem IRIs: globally unique stand-ins for resources that would
/// otherwise be blank nodes.
///
/// Without a well-known base the IRI is a bare UUID v4. With one it is
/// `{base}/.well-known/genid/{uuid}`.
///
/// # Example
/// ```
/// use noid_minter::SkolemIriFactory;
///
/// let factory = SkolemIriFactory::new().with_well_known_base("https://example.org/");
/// let iri = factory.skolem_iri();
/// assert!(iri.starts_with("https://example.org/.well-known/genid/"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkolemIriFactory {
    well_known_base: Option<String>,
    serializable_ids: bool,
}

impl SkolemIriFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base IRIs are minted under. A trailing `/` is dropped.
    #[must_use]
    pub fn with_well_known_base(mut self, base: impl Into<String>) -> Self {
        self.set_well_known_base(Some(base.into()));
        self
    }

    pub fn set_well_known_base(&mut self, base: Option<String>) {
        self.well_known_base = base.map(|mut base| {
            if base.ends_with('/') {
                base.pop();
            }
            base
        });
    }

    #[must_use]
    pub fn well_known_base(&self) -> Option<&str> {
        self.well_known_base.as_deref()
    }

    /// Whether generated identifiers should be written out when a document
    /// is serialized.
    #[must_use]
    pub fn creates_serializable_ids(&self) -> bool {
        self.serializable_ids
    }

    #[must_use]
    pub fn with_serializable_ids(mut self, serializable: bool) -> Self {
        self.serializable_ids = serializable;
        self
    }

    /// Mints a fresh IRI around a random UUID.
    #[must_use]
    pub fn skolem_iri(&self) -> String {
        self.skolem_iri_for(Uuid::new_v4())
    }

    /// Renders the IRI for a given UUID.
    #[must_use]
    pub fn skolem_iri_for(&self, uuid: Uuid) -> String {
        match &self.well_known_base {
            Some(base) => format!("{base}{GENID_PATH}{uuid}"),
            None => uuid.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UUID: &str = "0b9ec0e2-39d0-4c5f-9e8b-6a1f3b2c0d7e";

    #[test]
    fn bare_uuid_without_a_base() {
        let factory = SkolemIriFactory::new();
        let iri = factory.skolem_iri();
        let uuid = Uuid::parse_str(&iri).unwrap();
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let factory = SkolemIriFactory::new().with_well_known_base("https://example.org/");
        assert_eq!(factory.well_known_base(), Some("https://example.org"));

        let uuid = Uuid::parse_str(UUID).unwrap();
        assert_eq!(
            factory.skolem_iri_for(uuid),
            format!("https://example.org/.well-known/genid/{UUID}")
        );
    }

    #[test]
    fn base_can_be_removed() {
        let mut factory = SkolemIriFactory::new().with_well_known_base("https://example.org");
        factory.set_well_known_base(None);
        assert_eq!(factory.well_known_base(), None);
        assert!(Uuid::parse_str(&factory.skolem_iri()).is_ok());
    }

    #[test]
    fn iris_are_unique() {
        let factory = SkolemIriFactory::new().with_well_known_base("https://example.org");
        assert_ne!(factory.skolem_iri(), factory.skolem_iri());
    }

    #[test]
    fn serializable_flag() {
        let factory = SkolemIriFactory::new();
        assert!(!factory.creates_serializable_ids());
        assert!(factory.with_serializable_ids(true).creates_serializable_ids());
    }
}
