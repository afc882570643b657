/// Content of a regular file: the words it holds, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainFile {
    data: Vec<String>,
    name: String,
}

impl PlainFile {
    pub fn new(name: &str) -> Self {
        Self {
            data: Vec::new(),
            name: name.to_string(),
        }
    }

    pub fn read(&self) -> &[String] {
        &self.data
    }

    /// Replaces the whole content.
    pub fn write<S: AsRef<str>>(&mut self, words: &[S]) {
        self.data = words.iter().map(|w| w.as_ref().to_string()).collect();
    }

    /// Number of characters when printed with single spaces between words.
    /// An empty file has size 0.
    pub fn size(&self) -> usize {
        if self.data.is_empty() {
            return 0;
        }
        let chars: usize = self.data.iter().map(|w| w.len()).sum();
        chars + self.data.len() - 1
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}
