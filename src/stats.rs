use std::collections::HashMap;

/// Occurrence count per command, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
    total: usize,
}

impl FrequencyTable {
    pub fn from_commands<S: AsRef<str>>(commands: &[S]) -> Self {
        let mut table = FrequencyTable::default();
        for cmd in commands {
            let cmd = cmd.as_ref();
            match table.index.get(cmd) {
                Some(&slot) => table.entries[slot].1 += 1,
                None => {
                    table.index.insert(cmd.to_string(), table.entries.len());
                    table.entries.push((cmd.to_string(), 1));
                }
            }
            table.total += 1;
        }
        table
    }

    pub fn count(&self, cmd: &str) -> usize {
        self.index
            .get(cmd)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn unique(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.entries.iter().any(|(cmd, _)| cmd.starts_with(prefix))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(cmd, count)| (cmd.as_str(), *count))
    }

    /// The `n` most frequent commands. Equal counts keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Unique commands as a percentage of all commands.
    pub fn variety(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.unique() as f64 / self.total as f64) * 100.0
    }
}
