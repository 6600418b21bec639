// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_daily_note(events: usize) -> String {
    let mut content = String::from("# Journal\n\nMorning pages.\n\n- a thought\n- another [[link]]\n\n# Events\n\n");

    for i in 0..events {
        let hour = 8 + i % 10;
        match i % 4 {
            0 => content.push_str(&format!(
                "- [ ] Meeting {i} [date:: 2024-03-05] [startTime:: {hour:02}:00] [endTime:: {hour:02}:30]\n"
            )),
            1 => content.push_str(&format!(
                "- [x] Call {i} [date:: 2024-03-05] [allDay:: true]\n"
            )),
            2 => content.push_str(&format!(
                "- Class {i} [daysOfWeek:: M,W,F] [startTime:: {hour:02}:15] [room:: {i}]\n"
            )),
            _ => content.push_str(&format!("  - detail for {i}, not an event\n")),
        }
    }

    content.push_str("\n# Later\n\n- Someday [date:: 2025-01-01]\n");
    content
}

#[allow(dead_code)]
pub fn generate_notes_archive(days: usize, events_per_day: usize) -> String {
    (0..days)
        .map(|day| format!("# Day {day}\n\n{}", generate_daily_note(events_per_day)))
        .collect()
}
