use console::{measure_text_width, style};

/// Prints a boxed, colorized header describing the batch about to run.
///
/// The box is sized to the widest **visible** line, using
/// [`console::measure_text_width`] so ANSI codes in the content do not
/// throw off the padding. Borders are styled separately from the text.
///
/// # Parameters
///
/// * `origin` – Where the batch was loaded from (file path or "built-in batch").
/// * `groups` – Number of commit groups in the batch.
///
/// # Examples
///
/// ```no_run
/// use batch_commit::banner::print_banner;
///
/// fn main() {
///     print_banner("built-in batch", 21);
/// }
/// ```
pub fn print_banner(origin: &str, groups: usize) {
    let lines = banner_lines(origin, groups);

    let max_width = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        + 2;

    let border = "═".repeat(max_width);
    let top = style(format!("╔{}╗", border)).blue().bold();
    let bottom = style(format!("╚{}╝", border)).blue().bold();
    let left = style("║ ").blue().bold().to_string();
    let right = style("║").blue().bold().to_string();

    println!();
    println!("{top}");
    for line in lines {
        let pad = max_width - measure_text_width(&line);
        println!("{}{}{}{}", left, line, " ".repeat(pad - 1), right);
    }
    println!("{bottom}");
    println!();
}

/// Constructs the lines of text for the batch header.
///
/// Some lines carry ANSI styling; measure visible width, not `str::len()`.
fn banner_lines(origin: &str, groups: usize) -> Vec<String> {
    let noun = if groups == 1 { "group" } else { "groups" };

    vec![
        String::from("Batch commit"),
        String::new(),
        format!("Source: {}", style(origin).cyan().bold()),
        format!("{} commit {} will be processed in order.", groups, noun),
        style("Missing files are skipped; failures do not stop the run.")
            .dim()
            .to_string(),
    ]
}
