//! Plain-text rendering of a split plan.

use std::fmt;

use needsplit_core::money::format_minor;
use needsplit_core::types::SplitResult;

/// Human-readable view of a plan.
pub struct TextPlan<'a>(pub &'a SplitResult);

impl fmt::Display for TextPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "mode:        {}", result.mode)?;
        writeln!(f, "requested:   {}", format_minor(result.requested_amount))?;

        if result.is_empty() {
            writeln!(f, "no eligible needs")?;
        } else {
            writeln!(f, "allocations:")?;
            for a in &result.allocations {
                writeln!(
                    f,
                    "  {:<16} {:<10} {:>10}  ({} -> {} of {}){}",
                    a.need_id,
                    a.category,
                    format_minor(a.amount),
                    format_minor(a.raised_before),
                    format_minor(a.raised_after),
                    format_minor(a.goal_amount),
                    if a.will_complete { "  completes" } else { "" },
                )?;
            }
        }

        writeln!(f, "total:       {}", format_minor(result.total_amount))?;
        writeln!(f, "people:      {}", result.total_people)?;
        writeln!(f, "completed:   {}", result.goals_completed)?;
        writeln!(f, "fee:         {}", format_minor(result.fee))?;
        writeln!(f, "net:         {}", format_minor(result.net_amount))?;
        if result.unallocated > 0 {
            writeln!(f, "unallocated: {}", format_minor(result.unallocated))?;
        }
        for r in &result.rejected {
            writeln!(f, "rejected:    {} ({})", r.need_id, r.reason)?;
        }
        Ok(())
    }
}

pub fn render_text(result: &SplitResult) -> String {
    TextPlan(result).to_string()
}
