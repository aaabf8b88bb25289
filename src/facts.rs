use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::stats::FrequencyTable;

pub const DEFAULT_FACT: &str = "🌟 Writing your unique command line story!";

pub struct FactRule {
    pub message: &'static str,
    pub applies: fn(&FrequencyTable) -> bool,
}

lazy_static! {
    pub static ref FACTS: Vec<FactRule> = vec![
        // git
        FactRule { message: "🌳 You've planted quite the git forest!", applies: |t| t.count("git") > 10 },
        FactRule { message: "🔍 Always exploring new repos, aren't you?", applies: |t| t.has_prefix("git clone") },
        FactRule { message: "📝 Writing git commit poetry!", applies: |t| t.has_prefix("git commit") },
        FactRule { message: "🚀 To infinity and beyond with those pushes!", applies: |t| t.has_prefix("git push") },
        FactRule { message: "🎣 Pulling in code like a pro fisher!", applies: |t| t.has_prefix("git pull") },

        // system
        FactRule { message: "✨ Your terminal sparkles with those clear commands!", applies: |t| t.count("clear") > 5 },
        FactRule { message: "🧭 Who needs 'ls' when you know your way around?", applies: |t| t.count("cd") > t.count("ls") },
        FactRule { message: "👑 Sudo? More like sudo-god mode!", applies: |t| t.count("sudo") > 5 },
        FactRule { message: "⚡ Lightning fast with those system commands!", applies: |t| t.count("systemctl") > 3 },
        FactRule { message: "🔍 Directory detective extraordinaire!", applies: |t| t.count("ls") > 10 },

        // habits
        FactRule { message: "🎮 Commands are your video game!", applies: |t| t.unique() > 100 },
        FactRule { message: "🎨 Your terminal is your canvas!", applies: |t| t.count("vim") > 5 },
        FactRule { message: "🚄 Speed demon on the command line!", applies: |t| t.count("alias") > 3 },
        FactRule { message: "🎵 Dancing with the directory structure!", applies: |t| t.count("cd") > 20 },
        FactRule { message: "🌟 Making the terminal your happy place!", applies: |t| t.count("cowsay") > 0 },

        // always true, so there is always something to say
        FactRule { message: "🎪 Your terminal is more exciting than a circus!", applies: |_| true },
        FactRule { message: "🎭 Every command tells a story!", applies: |_| true },
        FactRule { message: "🎪 You're the ringmaster of this terminal!", applies: |_| true },
        FactRule { message: "🎨 Painting masterpieces with keystrokes!", applies: |_| true },
    ];
}

/// Messages of every rule that holds for `table`, in definition order.
pub fn matching_facts(table: &FrequencyTable) -> Vec<&'static str> {
    FACTS
        .iter()
        .filter(|rule| (rule.applies)(table))
        .map(|rule| rule.message)
        .collect()
}

pub fn pick_fact<R: Rng + ?Sized>(table: &FrequencyTable, rng: &mut R) -> &'static str {
    matching_facts(table)
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_FACT)
}
