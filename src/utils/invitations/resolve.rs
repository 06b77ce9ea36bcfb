//! Latest-wins resolution over invitation history.
//!
//! Rows sharing a (sender, email) pair form an append-only log; the current
//! state of the pair is the row with the greatest `created_at`. Inputs are
//! expected in insertion order, so a timestamp tie goes to the later row.

use crate::utils::invitations::models::{Invitation, InvitationStatus};
use std::collections::HashMap;
use std::hash::Hash;

/// Row with the greatest `created_at`, or `None` for an empty history.
pub fn latest<'a, I>(rows: I) -> Option<&'a Invitation>
where
    I: IntoIterator<Item = &'a Invitation>,
{
    rows.into_iter().fold(None, |best, row| match best {
        Some(best) if best.created_at > row.created_at => Some(best),
        _ => Some(row),
    })
}

/// Latest row among those currently in `status`.
pub fn latest_with_status(rows: &[Invitation], status: InvitationStatus) -> Option<&Invitation> {
    latest(rows.iter().filter(|row| row.status == status))
}

/// One row per key, keeping the latest. Output follows first appearance of each key.
fn latest_by<K, F>(rows: Vec<Invitation>, key: F) -> Vec<Invitation>
where
    K: Eq + Hash,
    F: Fn(&Invitation) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut kept: Vec<Invitation> = Vec::new();
    for row in rows {
        match index.get(&key(&row)).copied() {
            Some(i) if kept[i].created_at > row.created_at => {}
            Some(i) => kept[i] = row,
            None => {
                index.insert(key(&row), kept.len());
                kept.push(row);
            }
        }
    }
    kept
}

/// Rows addressed to a single email, reduced to the latest per sender.
pub fn latest_per_sender(rows: Vec<Invitation>) -> Vec<Invitation> {
    latest_by(rows, |row| row.from_user_id)
}

/// Rows sent by a single user, reduced to the latest per recipient email.
pub fn latest_per_recipient(rows: Vec<Invitation>) -> Vec<Invitation> {
    latest_by(rows, |row| row.email.clone())
}

/// Whether the history of a single (sender, email) pair currently grants access.
pub fn is_accepted(rows: &[Invitation]) -> bool {
    latest(rows).map_or(false, |row| row.status == InvitationStatus::Accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::OffsetDateTime;
    use uuid::{uuid, Uuid};

    const ALICE: Uuid = uuid!("910e81a9-56df-4c24-965a-13eff739f469");
    const CAROL: Uuid = uuid!("29e40c2a-7595-42d3-98e8-9fe93ce99972");

    fn row(
        from_user_id: Uuid,
        email: &str,
        status: InvitationStatus,
        created_at: OffsetDateTime,
    ) -> Invitation {
        Invitation {
            id: Uuid::new_v4(),
            from_user_id,
            email: email.to_string(),
            status,
            created_at,
        }
    }

    #[test]
    fn latest_of_empty_history_is_none() {
        let rows: Vec<Invitation> = Vec::new();
        assert!(latest(&rows).is_none());
    }

    #[test]
    fn latest_ignores_insertion_order() {
        let rows = vec![
            row(ALICE, "b@x.com", InvitationStatus::Pending, datetime!(2024-03-02 10:00 UTC)),
            row(ALICE, "b@x.com", InvitationStatus::Removed, datetime!(2024-03-01 10:00 UTC)),
        ];
        assert_eq!(latest(&rows).unwrap().id, rows[0].id);
    }

    #[test]
    fn timestamp_tie_goes_to_later_row() {
        let at = datetime!(2024-03-01 10:00 UTC);
        let rows = vec![
            row(ALICE, "b@x.com", InvitationStatus::Pending, at),
            row(ALICE, "b@x.com", InvitationStatus::Accepted, at),
        ];
        assert_eq!(latest(&rows).unwrap().id, rows[1].id);
    }

    #[test]
    fn latest_with_status_skips_other_statuses() {
        let rows = vec![
            row(ALICE, "b@x.com", InvitationStatus::Pending, datetime!(2024-03-01 10:00 UTC)),
            row(ALICE, "b@x.com", InvitationStatus::Pending, datetime!(2024-03-02 10:00 UTC)),
            row(ALICE, "b@x.com", InvitationStatus::Accepted, datetime!(2024-03-03 10:00 UTC)),
        ];
        let pending = latest_with_status(&rows, InvitationStatus::Pending).unwrap();
        assert_eq!(pending.id, rows[1].id);
        assert!(latest_with_status(&rows, InvitationStatus::Removed).is_none());
    }

    #[test]
    fn one_entry_per_sender_with_latest_status() {
        let rows = vec![
            row(ALICE, "b@x.com", InvitationStatus::Removed, datetime!(2024-03-01 10:00 UTC)),
            row(CAROL, "b@x.com", InvitationStatus::Accepted, datetime!(2024-03-01 11:00 UTC)),
            row(ALICE, "b@x.com", InvitationStatus::Pending, datetime!(2024-03-02 10:00 UTC)),
        ];
        let reduced = latest_per_sender(rows);

        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].from_user_id, ALICE);
        assert_eq!(reduced[0].status, InvitationStatus::Pending);
        assert_eq!(reduced[1].from_user_id, CAROL);
        assert_eq!(reduced[1].status, InvitationStatus::Accepted);
    }

    #[test]
    fn one_entry_per_recipient() {
        let rows = vec![
            row(ALICE, "b@x.com", InvitationStatus::Accepted, datetime!(2024-03-01 10:00 UTC)),
            row(ALICE, "c@x.com", InvitationStatus::Pending, datetime!(2024-03-01 11:00 UTC)),
            row(ALICE, "b@x.com", InvitationStatus::Pending, datetime!(2024-03-02 10:00 UTC)),
        ];
        let reduced = latest_per_recipient(rows);

        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].email, "b@x.com");
        assert_eq!(reduced[0].status, InvitationStatus::Pending);
        assert_eq!(reduced[1].email, "c@x.com");
    }

    #[test]
    fn access_follows_latest_row_only() {
        let mut rows = vec![row(
            ALICE,
            "b@x.com",
            InvitationStatus::Accepted,
            datetime!(2024-03-01 10:00 UTC),
        )];
        assert!(is_accepted(&rows));

        rows.push(row(
            ALICE,
            "b@x.com",
            InvitationStatus::Pending,
            datetime!(2024-03-02 10:00 UTC),
        ));
        assert!(!is_accepted(&rows));
        assert!(!is_accepted(&[]));
    }
}
