use crate::domain::{BumpType, ParsedCommitMessage, TypeKind};

/// Reduce commit messages to the version bump they justify.
///
/// Unparseable messages and chores contribute nothing. A breaking change is a
/// major bump, except during initial development where it only counts as minor
/// unless the same commit also completes initial development. The result is the
/// most severe contribution, so message order does not matter.
///
/// Returns `None` when no message contributed.
pub fn calc_bump_type<I, S>(is_initial_development: bool, messages: I) -> Option<BumpType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Option<BumpType> = None;
    let mut considered = 0usize;

    for message in messages {
        considered += 1;
        let Some(parsed) = ParsedCommitMessage::parse(message.as_ref()) else {
            continue;
        };

        let Some(contribution) = bump_contribution(is_initial_development, &parsed) else {
            continue;
        };

        result = result.max(Some(contribution));

        // Nothing outranks a major bump
        if result == Some(BumpType::Major) {
            break;
        }
    }

    tracing::debug!(
        is_initial_development,
        considered,
        bump = ?result,
        "calculated bump type"
    );
    result
}

fn bump_contribution(
    is_initial_development: bool,
    parsed: &ParsedCommitMessage,
) -> Option<BumpType> {
    if parsed.type_kind == TypeKind::Chore {
        return None;
    }

    if parsed.is_breaking_change() {
        if !is_initial_development || parsed.completes_initial_development {
            return Some(BumpType::Major);
        }
        return Some(BumpType::Minor);
    }

    match parsed.type_kind {
        TypeKind::Feat => Some(BumpType::Minor),
        _ => Some(BumpType::Patch),
    }
}
