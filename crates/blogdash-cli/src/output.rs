//! Output formatting helpers.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use blogdash_view::{AuthorBucket, PageState, PageView, color_for};

/// Widest bar drawn for the largest bucket.
const BAR_WIDTH: usize = 30;

const TITLE_WIDTH: usize = 40;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a section heading.
pub fn heading(title: &str) {
    println!("{}", title.bold());
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn paint(text: &str, hex: &str) -> ColoredString {
    match rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn bar_len(count: usize, max: usize) -> usize {
    if max == 0 {
        return 0;
    }
    (count * BAR_WIDTH).div_ceil(max).max(1)
}

/// Posts-per-author chart: one row per bucket with colour, bar and share.
pub fn buckets(buckets: &[AuthorBucket]) {
    if buckets.is_empty() {
        println!("{}", "No authors to chart.".dimmed());
        return;
    }

    let total: usize = buckets.iter().map(|b| b.count).sum();
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    let name_width = buckets
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(0);

    for (i, bucket) in buckets.iter().enumerate() {
        let color = color_for(i);
        let bar = "█".repeat(bar_len(bucket.count, max));
        let share = bucket.count as f64 * 100.0 / total as f64;
        println!(
            "{} {:<width$}  {:>4}  {:>5.1}%  {}",
            paint("●", color),
            bucket.name,
            bucket.count,
            share,
            paint(&bar, color),
            width = name_width,
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// One page of the posts table.
pub fn table(page: &PageView) {
    let id_width = page
        .posts
        .iter()
        .map(|p| p.id.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max(2);

    println!(
        "{}",
        format!(
            "{:<id_width$}  {:<TITLE_WIDTH$}  {:<16}  {:<10}",
            "ID", "Title", "Author", "Created"
        )
        .dimmed()
    );

    if page.is_empty() {
        println!("{}", "No posts found".dimmed());
        return;
    }

    for post in &page.posts {
        println!(
            "{:<id_width$}  {:<TITLE_WIDTH$}  {:<16}  {:<10}",
            post.id.as_str(),
            truncate(&post.title, TITLE_WIDTH),
            truncate(post.author_label(), 16),
            post.display_date(),
        );
    }
}

/// Page indicator with the current page highlighted.
pub fn navigation(state: &PageState) {
    if !state.shows_navigation() {
        return;
    }

    let links: Vec<String> = state
        .page_numbers()
        .map(|n| {
            if n == state.current_page {
                format!("[{n}]").bold().to_string()
            } else {
                n.to_string()
            }
        })
        .collect();

    let mut hints = Vec::new();
    if state.has_previous() {
        hints.push(format!("previous: --page {}", state.current_page - 1));
    }
    if state.has_next() {
        hints.push(format!("next: --page {}", state.current_page + 1));
    }

    println!(
        "Page {} of {}  {}  {}",
        state.current_page,
        state.total_pages,
        links.join(" "),
        hints.join(", ").dimmed()
    );
}
