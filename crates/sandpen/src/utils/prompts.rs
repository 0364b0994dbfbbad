pub(crate) mod validators {
    use inquire::validator::{ErrorMessage, Validation};
    use sandpen_core::LibraryKind;

    #[allow(clippy::unnecessary_wraps)]
    pub(crate) fn library_url(
        input: &str,
    ) -> Result<Validation, Box<dyn std::error::Error + Send + Sync>> {
        if input.trim().is_empty() {
            return Ok(Validation::Valid);
        }
        if url::Url::parse(input.trim()).is_err() {
            return Ok(Validation::Invalid(ErrorMessage::Custom(
                "Must be a valid URL".into(),
            )));
        }
        if LibraryKind::of(input.trim()).is_none() {
            return Ok(Validation::Invalid(ErrorMessage::Custom(
                "Must point at a .css or .js file".into(),
            )));
        }
        Ok(Validation::Valid)
    }
}
