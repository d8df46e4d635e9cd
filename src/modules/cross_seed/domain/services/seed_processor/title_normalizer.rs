use std::sync::OnceLock;

/// Transformation that can be applied to a release title
///
/// Each transformation is composable and testable in isolation.
pub trait TitleTransformation: Send + Sync {
    fn transform(&self, title: &str) -> String;
    fn name(&self) -> &'static str;
}

/// Converts title to lowercase
#[derive(Debug, Clone)]
pub struct LowercaseTransform;

impl TitleTransformation for LowercaseTransform {
    fn transform(&self, title: &str) -> String {
        title.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "Lowercase"
    }
}

/// Replaces each separator character with a single space
#[derive(Debug, Clone)]
pub struct ReplaceSeparatorsTransform {
    separators: Vec<char>,
}

impl ReplaceSeparatorsTransform {
    pub fn new(separators: Vec<char>) -> Self {
        Self { separators }
    }
}

impl TitleTransformation for ReplaceSeparatorsTransform {
    fn transform(&self, title: &str) -> String {
        title
            .chars()
            .map(|c| if self.separators.contains(&c) { ' ' } else { c })
            .collect()
    }

    fn name(&self) -> &'static str {
        "ReplaceSeparators"
    }
}

/// Normalizes whitespace (collapses multiple spaces, trims)
#[derive(Debug, Clone)]
pub struct NormalizeWhitespaceTransform;

impl TitleTransformation for NormalizeWhitespaceTransform {
    fn transform(&self, title: &str) -> String {
        title.split_whitespace().collect::<Vec<&str>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "NormalizeWhitespace"
    }
}

/// Title normalizer that applies a pipeline of transformations
pub struct TitleNormalizer {
    transformations: Vec<Box<dyn TitleTransformation>>,
}

impl TitleNormalizer {
    /// Create a new empty normalizer
    pub fn new() -> Self {
        Self {
            transformations: Vec::new(),
        }
    }

    /// The grouping-key pipeline: lowercase, `.`/`_` to space, collapse whitespace.
    ///
    /// Release-group, resolution and codec tags are left alone, so titles that
    /// differ by any word never collapse to the same key.
    pub fn release_pipeline() -> Self {
        Self::new()
            .with_lowercase()
            .with_replace_separators(vec!['.', '_'])
            .with_normalize_whitespace()
    }

    /// Add lowercase transformation
    pub fn with_lowercase(mut self) -> Self {
        self.transformations.push(Box::new(LowercaseTransform));
        self
    }

    /// Add separator replacement transformation
    pub fn with_replace_separators(mut self, separators: Vec<char>) -> Self {
        self.transformations
            .push(Box::new(ReplaceSeparatorsTransform::new(separators)));
        self
    }

    /// Add whitespace normalization transformation
    pub fn with_normalize_whitespace(mut self) -> Self {
        self.transformations
            .push(Box::new(NormalizeWhitespaceTransform));
        self
    }

    /// Apply all transformations to the title
    pub fn normalize(&self, title: &str) -> String {
        let mut result = title.to_string();

        for transformation in &self.transformations {
            result = transformation.transform(&result);
            log::trace!("After {}: '{}'", transformation.name(), result);
        }

        result
    }

    /// Get the number of transformations in the pipeline
    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::release_pipeline()
    }
}

/// Normalize a raw release title into its grouping key. Never fails.
pub fn normalize(raw_title: &str) -> String {
    static RELEASE_NORMALIZER: OnceLock<TitleNormalizer> = OnceLock::new();
    RELEASE_NORMALIZER
        .get_or_init(TitleNormalizer::release_pipeline)
        .normalize(raw_title)
}
