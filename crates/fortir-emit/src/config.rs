use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    pub use_colors: bool,
    pub indent_style: IndentStyle,
    pub include_locations: bool,
    pub verbosity: VerbosityLevel,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            indent_style: IndentStyle::Spaces(4),
            include_locations: false,
            verbosity: VerbosityLevel::Normal,
        }
    }
}

impl EmitterConfig {
    /// Plain-text configuration for files and tests.
    pub fn plain() -> Self {
        Self {
            use_colors: false,
            ..Default::default()
        }
    }

    pub fn annotated() -> Self {
        Self {
            include_locations: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl IndentStyle {
    /// One indentation unit as written to the output.
    pub fn unit(&self) -> String {
        match self {
            IndentStyle::Spaces(n) => " ".repeat(*n),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerbosityLevel {
    Quiet,
    Normal,
    Verbose,
}

impl VerbosityLevel {
    /// Quiet output is pure IR with no comment lines at all.
    pub fn comments_enabled(&self) -> bool {
        !matches!(self, VerbosityLevel::Quiet)
    }

    /// Verbose output adds a size summary comment per function.
    pub fn is_verbose(&self) -> bool {
        matches!(self, VerbosityLevel::Verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_style_rendering() {
        assert_eq!(IndentStyle::Spaces(4).unit(), "    ");
        assert_eq!(IndentStyle::Tabs.unit(), "\t");
    }

    #[test]
    fn test_annotated_config() {
        let config = EmitterConfig::annotated();
        assert!(config.include_locations);

        let plain = EmitterConfig::plain();
        assert!(!plain.use_colors);
        assert!(!plain.include_locations);
    }

    #[test]
    fn test_verbosity_predicates() {
        assert!(!VerbosityLevel::Quiet.comments_enabled());
        assert!(VerbosityLevel::Normal.comments_enabled());
        assert!(VerbosityLevel::Verbose.comments_enabled());

        assert!(VerbosityLevel::Verbose.is_verbose());
        assert!(!VerbosityLevel::Normal.is_verbose());
    }
}
