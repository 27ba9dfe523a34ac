use std::collections::HashMap;

/// Resolves contract field names against the column names of a batch,
/// ignoring ASCII case. The first spelling seen for a name wins.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    columns: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = HashMap::new();
        for name in names {
            let name = name.as_ref();
            columns
                .entry(name.to_ascii_lowercase())
                .or_insert_with(|| name.to_string());
        }
        Self { columns }
    }

    /// The batch's own spelling of `field`, if the batch has it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.columns
            .get(&field.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.columns.contains_key(&field.to_ascii_lowercase())
    }
}
