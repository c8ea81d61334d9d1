/// One level of indentation in generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// Two spaces, the layout of every generated binding.
    #[default]
    Cpp,
    Tab,
}

impl Indent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpp => "  ",
            Self::Tab => "\t",
        }
    }
}
