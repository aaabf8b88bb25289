use std::io::{self, Write};

use rand::Rng;
use serde_json::json;
use thousands::Separable;

use crate::facts;
use crate::history::ShellKind;
use crate::personality::{self, Archetype};
use crate::stats::FrequencyTable;
use crate::style::Palette;

/// Below this many commands there is not enough to summarize.
pub const MIN_COMMANDS: usize = 10;

pub const DEFAULT_TOP: usize = 5;

const BANNER: &str = r#"
    $$$$$$\  $$\       $$$$$$\        $$\      $$\                                                         $$\
   $$  __$$\ $$ |      \_$$  _|       $$ | $\  $$ |                                                        $$ |
   $$ /  \__|$$ |        $$ |         $$ |$$$\ $$ | $$$$$$\  $$$$$$\   $$$$$$\   $$$$$$\    $$$$$$\   $$$$$$$ |
   $$ |      $$ |        $$ |         $$ $$ $$\$$ |$$  __$$\ \____$$\  $$  __$$\ $$  __$$\ $$  __$$\ $$  __$$ |
   $$ |      $$ |        $$ |         $$$$  _$$$$ |$$ |  \__|$$$$$$$ | $$ /  $$ |$$ /  $$ |$$$$$$$$ |$$ /  $$ |
   $$ |  $$\ $$ |        $$ |         $$$  / \$$$ |$$ |     $$  __$$ | $$ |  $$ |$$ |  $$ |$$   ____|$$ |  $$ |
   \$$$$$$  |$$$$$$$$\ $$$$$$\        $$  /   \$$ |$$ |     \$$$$$$$ | $$$$$$$  |$$$$$$$  |\$$$$$$$\ \$$$$$$$ |
    \______/ \________|\______|       \__/     \__|\__|      \_______| $$  ____/ $$  ____/  \_______| \_______|
                                                                       $$ |      $$ |
                                                                       $$ |      $$ |
                                                                       \__|      \__|
"#;

#[derive(Debug)]
pub struct Summary<'a> {
    pub shell: ShellKind,
    pub total: usize,
    pub unique: usize,
    pub variety: f64,
    pub top: Vec<(&'a str, usize)>,
    pub personality: &'static Archetype,
    pub fun_fact: &'static str,
}

#[derive(Debug)]
pub enum Report<'a> {
    Empty,
    Insufficient { total: usize, needed: usize },
    Full(Summary<'a>),
}

impl<'a> Report<'a> {
    pub fn build<R: Rng + ?Sized>(
        table: &'a FrequencyTable,
        shell: ShellKind,
        top: usize,
        rng: &mut R,
    ) -> Self {
        let total = table.total();
        if total == 0 {
            return Report::Empty;
        }
        if total < MIN_COMMANDS {
            return Report::Insufficient {
                total,
                needed: MIN_COMMANDS - total,
            };
        }

        Report::Full(Summary {
            shell,
            total,
            unique: table.unique(),
            variety: table.variety(),
            top: table.most_common(top),
            personality: personality::classify(table),
            fun_fact: facts::pick_fact(table, rng),
        })
    }
}

pub fn render_banner<W: Write>(out: &mut W, p: &Palette) -> io::Result<()> {
    write!(out, "{}", p.clear_screen())?;
    writeln!(out, "{}{}{}", p.yellow, BANNER, p.reset)
}

pub fn render<W: Write>(out: &mut W, report: &Report<'_>, p: &Palette) -> io::Result<()> {
    match report {
        Report::Empty => render_onboarding(out, p),
        Report::Insufficient { total, needed } => render_progress(out, *total, *needed, p),
        Report::Full(summary) => render_summary(out, summary, p),
    }
}

fn render_onboarding<W: Write>(out: &mut W, p: &Palette) -> io::Result<()> {
    writeln!(out, "\n{}{}WELCOME TO THE COMMAND LINE ADVENTURE!{}", p.yellow, p.bold, p.reset)?;
    writeln!(out, "\n{}Your journey begins here! Try these magical incantations:{}", p.green, p.reset)?;
    writeln!(out)?;
    let spells = [
        ("ls", "Reveal hidden treasures"),
        ("cd", "Traverse the directory realms"),
        ("pwd", "Discover your current location"),
        ("mkdir", "Create new realms"),
        ("touch", "Conjure new files"),
    ];
    for (cmd, hint) in spells.iter() {
        writeln!(out, "{}{}{} - {}", p.blue, cmd, p.reset, hint)?;
    }
    writeln!(out, "\n{}{}Pro tip:{} The up arrow reveals past commands!", p.green, p.bold, p.reset)
}

fn render_progress<W: Write>(out: &mut W, total: usize, needed: usize, p: &Palette) -> io::Result<()> {
    writeln!(out, "\n{}{}LEVEL UP IN PROGRESS!{}", p.yellow, p.bold, p.reset)?;
    writeln!(out, "{}You've cast {} command spells so far!{}", p.green, total, p.reset)?;
    writeln!(out, "Just {} more to unlock your full CLI Wrapped experience!", needed)?;
    writeln!(out, "\n{}Keep exploring, future command line warrior!{} 🚀", p.blue, p.reset)
}

fn render_summary<W: Write>(out: &mut W, s: &Summary<'_>, p: &Palette) -> io::Result<()> {
    writeln!(out, "\n{}{}YOUR DEV PERSONALITY{}", p.yellow, p.bold, p.reset)?;
    writeln!(out, "{}{}{}{}", p.blue, p.bold, s.personality.title(), p.reset)?;
    writeln!(out, "{}", s.personality.message)?;

    writeln!(out, "\n{}{}FUN FACT{}", p.yellow, p.bold, p.reset)?;
    writeln!(out, "{}{}{}{}", p.red, p.bold, s.fun_fact, p.reset)?;

    writeln!(out, "\n{}{}COMMAND STATS{}", p.yellow, p.bold, p.reset)?;
    writeln!(out, "{}Total Commands Cast: {}{}{}", p.green, p.bold, s.total.separate_with_commas(), p.reset)?;
    writeln!(
        out,
        "{}Unique Spells Known: {}{} ({:.1}% variety){}",
        p.green,
        p.bold,
        s.unique.separate_with_commas(),
        s.variety,
        p.reset
    )?;
    writeln!(out, "{}Preferred Scroll Type: {}{}{}", p.green, p.bold, s.shell, p.reset)?;

    writeln!(out, "\n{}{}TOP COMMANDS{}", p.yellow, p.bold, p.reset)?;
    for (cmd, count) in &s.top {
        writeln!(out, "{:<25} {} times", cmd, count.separate_with_commas())?;
    }
    Ok(())
}

pub fn to_json(report: &Report<'_>) -> serde_json::Value {
    match report {
        Report::Empty => json!({
            "status": "empty",
            "total": 0,
        }),
        Report::Insufficient { total, needed } => json!({
            "status": "insufficient",
            "total": total,
            "needed": needed,
        }),
        Report::Full(s) => {
            let top: Vec<_> = s
                .top
                .iter()
                .map(|(cmd, count)| json!({ "command": cmd, "count": count }))
                .collect();
            json!({
                "status": "ok",
                "shell": s.shell,
                "total": s.total,
                "unique": s.unique,
                "personality": {
                    "name": s.personality.name,
                    "message": s.personality.message,
                },
                "fun_fact": s.fun_fact,
                "top_commands": top,
            })
        }
    }
}

pub fn render_json<W: Write>(out: &mut W, report: &Report<'_>) -> io::Result<()> {
    let text = serde_json::to_string_pretty(&to_json(report))?;
    writeln!(out, "{}", text)
}
