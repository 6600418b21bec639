/*!
 * # Line Rewriting
 *
 * Writes an event back into the outline by replacing exactly one list line.
 *
 * ## Principles
 *
 * ### 1. Lossless outside the edited line
 * - The document is held in an **`xi_rope::Rope`** and the new line is spliced in
 *   with a single edit over the line's span
 * - Every byte before and after the span is preserved verbatim
 *
 * ### 2. Patch-driven
 * - An **`EventPatch`** carries the title, the checkbox edit and the tag fields
 * - Omitted title and checkbox fall back to what the line already has
 * - Tags are regenerated from the patch; build the patch from the full
 *   `EventRecord` (`EventPatch::from`) to keep fields the edit does not touch
 *
 * ### 3. Stale positions are a no-op
 * - A span that no longer addresses a `-` bullet yields `Ok(None)` and a warning
 * - Values that would not read back (`]`, line breaks, `::`) are rejected
 *   before anything is written
 *
 * ## Usage Pattern
 *
 * ```rust
 * use outline_calendar_engine::editing::{EventPatch, rewrite_list_item};
 * use outline_calendar_engine::parsing::Span;
 * use xi_rope::Rope;
 *
 * let rope = Rope::from("- [ ] Dentist [date:: 2024-03-05]\n");
 * let patch = EventPatch::new().set("date", "2024-03-06");
 * let new_text = rewrite_list_item(&rope, Span::new(0, 33), &patch, &[])
 *     .unwrap()
 *     .unwrap();
 * assert_eq!(new_text.to_string(), "- [ ] Dentist [date:: 2024-03-06]\n");
 * ```
 */

pub mod patch;
pub mod rewrite;

pub use patch::{CompletionEdit, EventPatch};
pub use rewrite::{RewriteError, replace_at_span, rewrite_list_item};
