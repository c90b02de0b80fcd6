//! Duplicate translation detection

use crate::slack::ThreadMessage;

/// Whether `candidate` was already posted somewhere in the thread
///
/// A message counts as a prior post only if it is a bot reply carrying an
/// attachment whose body equals `candidate` exactly. Every message is
/// inspected; order does not matter. `None` stands for an attachment without a
/// body (the "not supported" notice); bot messages without any attachment
/// never match.
#[must_use]
pub fn is_duplicate(thread: &[ThreadMessage], candidate: Option<&str>) -> bool {
    thread.iter().any(|msg| {
        msg.is_reply_subtype
            && msg.has_attachment
            && msg.existing_attachment_text.as_deref() == candidate
    })
}
