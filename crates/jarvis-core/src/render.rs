use std::io::{self, IsTerminal, Write};

use jarvis_shared::present::{category_tone, priority_tone, truncate_description};
use jarvis_shared::{Filter, FilterCounts, Task};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const TABLE_DESCRIPTION_CHARS: usize = 40;
const NO_TASKS_MESSAGE: &str = "No tasks yet. Run `jarvis add` to create one!";

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let wanted = cfg.get_bool("color")?.unwrap_or(true);
        Ok(Self {
            color: wanted && io::stdout().is_terminal(),
        })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn write_counts<W: Write>(
        &self,
        out: &mut W,
        counts: FilterCounts,
        active: Filter,
    ) -> anyhow::Result<()> {
        let cells: Vec<String> = Filter::ALL
            .into_iter()
            .map(|filter| {
                let cell = format!("{} {}", filter.label(), counts.count(filter));
                if filter == active {
                    self.paint(&format!("[{cell}]"), "1")
                } else {
                    cell
                }
            })
            .collect();
        writeln!(out, "{}", cells.join("  "))?;
        Ok(())
    }

    #[tracing::instrument(skip(self, out, tasks), fields(count = tasks.len()))]
    pub fn write_task_table<W: Write>(&self, out: &mut W, tasks: &[&Task]) -> anyhow::Result<()> {
        if tasks.is_empty() {
            writeln!(out, "{NO_TASKS_MESSAGE}")?;
            return Ok(());
        }

        let headers = ["ID", "Done", "Name", "Priority", "Category", "Start", "End", "Description"]
            .map(str::to_string)
            .to_vec();

        let rows = tasks
            .iter()
            .map(|task| {
                let name = if task.completed {
                    self.paint(&task.name, "9")
                } else {
                    task.name.clone()
                };
                vec![
                    self.paint(&task.id.to_string(), "33"),
                    if task.completed { "x" } else { " " }.to_string(),
                    name,
                    self.paint(task.priority.label(), tone_code(priority_tone(task.priority))),
                    self.paint(task.category.label(), tone_code(category_tone(task.category))),
                    task.start_date.to_string(),
                    task.end_date.to_string(),
                    truncate_description(
                        &single_line(&task.description),
                        TABLE_DESCRIPTION_CHARS,
                    ),
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    pub fn write_task_info<W: Write>(&self, out: &mut W, task: &Task) -> anyhow::Result<()> {
        writeln!(out, "id          {}", task.id)?;
        writeln!(out, "name        {}", task.name)?;
        writeln!(
            out,
            "status      {}",
            if task.completed { "completed" } else { "pending" }
        )?;
        writeln!(out, "priority    {}", task.priority)?;
        writeln!(out, "category    {}", task.category)?;
        writeln!(out, "start       {}", task.start_date)?;
        writeln!(out, "end         {}", task.end_date)?;
        writeln!(out, "description")?;
        for line in task.description.lines() {
            writeln!(out, "  {line}")?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || code.is_empty() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

// Table rows are one physical line each.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn tone_code(tone: &str) -> &'static str {
    match tone {
        "high" => "31",
        "medium" => "33",
        "low" => "32",
        "work" => "34",
        "personal" => "35",
        "general" => "36",
        _ => "",
    }
}

fn write_table<W: Write>(
    writer: &mut W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let mut widths: Vec<usize> = headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:w$}"))
        .collect();
    writeln!(writer, "{}", header_line.join(" ").trim_end())?;

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    writeln!(writer, "{}", rule.join(" "))?;

    for row in rows {
        let mut line = String::new();
        for (idx, cell) in row.iter().enumerate() {
            if idx > 0 {
                line.push(' ');
            }
            let visible = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            line.push_str(cell);
            line.push_str(&" ".repeat(widths[idx].saturating_sub(visible)));
        }
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }
        if ch == '\x1b' {
            escaped = true;
            continue;
        }
        out.push(ch);
    }

    out
}
