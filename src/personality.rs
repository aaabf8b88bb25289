use lazy_static::lazy_static;

use crate::stats::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archetype {
    pub name: &'static str,
    pub emoji: &'static str,
    pub commands: &'static [&'static str],
    pub message: &'static str,
}

impl Archetype {
    pub fn title(&self) -> String {
        format!("{} {}", self.name, self.emoji)
    }

    /// Sum of the counts of every trigger command, matched exactly.
    pub fn score(&self, table: &FrequencyTable) -> usize {
        self.commands.iter().map(|cmd| table.count(cmd)).sum()
    }
}

lazy_static! {
    // Order matters: on equal scores the earlier archetype wins.
    pub static ref ARCHETYPES: Vec<Archetype> = vec![
        Archetype {
            name: "Git Wizard",
            emoji: "🧙‍♂️",
            commands: &["git", "gh", "gitlab", "commit", "push", "pull"],
            message: "Merging branches like a magic spell! Your git-fu is legendary!",
        },
        Archetype {
            name: "Docker Captain",
            emoji: "🐋",
            commands: &["docker", "docker-compose", "kubectl", "container"],
            message: "Sailing the container seas! Your pods are always shipshape!",
        },
        Archetype {
            name: "Backend Architect",
            emoji: "🏗️",
            commands: &["python", "node", "npm", "postgresql", "mongo"],
            message: "Building digital castles in the cloud! Your APIs are works of art!",
        },
        Archetype {
            name: "System Ninja",
            emoji: "🥷",
            commands: &["systemctl", "sudo", "apt", "service", "dpkg", "journalctl"],
            message: "Silently maintaining the system! The terminal trembles at your power!",
        },
        Archetype {
            name: "File Samurai",
            emoji: "⚔️",
            commands: &["ls", "cd", "tree", "find", "cp", "mv"],
            message: "Slicing through directories with precision! Your filesystem fears you!",
        },
        Archetype {
            name: "Shell Alchemist",
            emoji: "🧪",
            commands: &["grep", "sed", "awk", "curl", "wget", "ssh"],
            message: "Transforming text into gold! Your one-liners are pure magic!",
        },
        Archetype {
            name: "Terminal Explorer",
            emoji: "🗺️",
            commands: &["ls", "cd", "clear", "cat", "echo", "less"],
            message: "Charting new paths in the command line universe! Adventure awaits!",
        },
    ];
}

/// Returned when no archetype scores at all.
pub static APPRENTICE: Archetype = Archetype {
    name: "Terminal Apprentice",
    emoji: "🌱",
    commands: &[],
    message: "Beginning your journey in the command line arts!",
};

pub fn classify(table: &FrequencyTable) -> &'static Archetype {
    let mut best: Option<(&'static Archetype, usize)> = None;
    for archetype in ARCHETYPES.iter() {
        let score = archetype.score(table);
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((archetype, score)),
        }
    }
    best.map(|(archetype, _)| archetype).unwrap_or(&APPRENTICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(counts: &[(&str, usize)]) -> FrequencyTable {
        let commands: Vec<&str> = counts
            .iter()
            .flat_map(|&(cmd, n)| std::iter::repeat(cmd).take(n))
            .collect();
        FrequencyTable::from_commands(&commands)
    }

    #[test]
    fn git_heavy_history_is_a_wizard() {
        let t = table(&[("git", 15), ("ls", 3)]);
        assert_eq!(classify(&t).name, "Git Wizard");
    }

    #[test]
    fn triggers_match_exact_commands_only() {
        // "git status" is not "git"
        let t = table(&[("git status", 30), ("sudo", 1)]);
        assert_eq!(classify(&t).name, "System Ninja");
    }

    #[test]
    fn ties_go_to_the_first_defined_archetype() {
        // ls/cd score identically for File Samurai and Terminal Explorer
        let t = table(&[("ls", 4), ("cd", 2)]);
        assert_eq!(classify(&t).name, "File Samurai");
    }

    #[test]
    fn scores_add_up_across_triggers() {
        let t = table(&[("cat", 3), ("echo", 3), ("ls", 1), ("grep", 6)]);
        assert_eq!(ARCHETYPES[6].score(&t), 7);
        assert_eq!(classify(&t).name, "Terminal Explorer");
    }

    #[test]
    fn sparse_history_is_an_apprentice() {
        let t = table(&[("make", 4), ("cargo build", 2)]);
        assert_eq!(classify(&t), &APPRENTICE);
        assert_eq!(classify(&FrequencyTable::default()).name, "Terminal Apprentice");
    }

    #[test]
    fn classification_is_deterministic() {
        let t = table(&[("docker", 5), ("npm", 5), ("python", 1)]);
        assert_eq!(classify(&t), classify(&t));
        assert_eq!(classify(&t).name, "Backend Architect");
    }
}
