/// Generates the parameter names used within one command-building session.
///
/// Names follow the pattern `<prefix><ordinal>` with the ordinal starting at
/// 0, so every name is distinct from every other returned since the last
/// [`reset`](ParameterNameGenerator::reset). An instance is owned by exactly
/// one building session and is not safe for unsynchronized concurrent use;
/// obtain one per session from [`ParameterNameGeneratorFactory`].
#[derive(Debug)]
pub struct ParameterNameGenerator {
    prefix: String,
    ordinal: usize,
}

impl ParameterNameGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ordinal: 0,
        }
    }

    /// The next fresh name in this session.
    pub fn generate_next(&mut self) -> String {
        let mut buffer = itoa::Buffer::new();
        let name = [self.prefix.as_str(), buffer.format(self.ordinal)].concat();
        self.ordinal += 1;
        name
    }

    /// Rewind the ordinal to 0, permitting name reuse in a new session.
    pub fn reset(&mut self) {
        self.ordinal = 0;
    }
}

impl Default for ParameterNameGenerator {
    fn default() -> Self {
        Self::new("p")
    }
}

/// Shared, immutable-state factory handing out a fresh generator per
/// building session. Safe to call from any number of threads.
#[derive(Debug, Clone)]
pub struct ParameterNameGeneratorFactory {
    prefix: String,
}

impl ParameterNameGeneratorFactory {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn create(&self) -> ParameterNameGenerator {
        ParameterNameGenerator::new(self.prefix.clone())
    }
}

impl Default for ParameterNameGeneratorFactory {
    fn default() -> Self {
        Self::new("p")
    }
}
