use uuid::Uuid;

/// Generate a fresh random seed for an id generator.
pub fn new_seed() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Prefixed sequential ID generator for document nodes.
///
/// Ids look like `block-3fa09c21-4`. The seed is random per generator, so two
/// generators never collide; the counter keeps ids unique within one
/// generator. Callers may rely on uniqueness, never on the id's shape.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::from_seed(new_seed())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn next_section_id(&mut self) -> String {
        self.next_id("section")
    }

    pub fn next_column_id(&mut self) -> String {
        self.next_id("column")
    }

    pub fn next_block_id(&mut self) -> String {
        self.next_id("block")
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", prefix, self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
