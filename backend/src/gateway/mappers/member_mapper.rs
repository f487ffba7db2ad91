use crate::domain::models::{Member, MemberUpdate, NewMember};
use crate::gateway::rows::{MemberPatchRow, MemberRow, NewMemberRow};
use crate::gateway::{Collection, RemoteError};

use super::{format_timestamp, parse_enum, parse_timestamp};

pub struct MemberMapper;

impl MemberMapper {
    pub fn to_domain(row: MemberRow) -> Result<Member, RemoteError> {
        Ok(Member {
            status: parse_enum(Collection::Members, &row.status)?,
            joined_at: parse_timestamp(Collection::Members, "join_date", &row.join_date)?,
            created_at: parse_timestamp(Collection::Members, "created_at", &row.created_at)?,
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
        })
    }

    pub fn to_insert_row(member: &NewMember) -> NewMemberRow {
        NewMemberRow {
            name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            status: member.status.as_str().to_string(),
            join_date: format_timestamp(member.joined_at),
        }
    }

    pub fn to_patch_row(changes: &MemberUpdate) -> MemberPatchRow {
        MemberPatchRow {
            name: changes.name.clone(),
            email: changes.email.clone(),
            phone: changes.phone.clone(),
            status: changes.status.map(|status| status.as_str().to_string()),
            join_date: changes.joined_at.map(format_timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use shared::MemberStatus;

    fn row() -> MemberRow {
        MemberRow {
            id: "8b6f".to_string(),
            name: "Maria Souza".to_string(),
            email: None,
            phone: Some("+55 11 99999-0000".to_string()),
            status: "visitor".to_string(),
            join_date: "2026-09-14T10:00:00+00:00".to_string(),
            created_at: "2026-09-14T10:05:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_to_domain() {
        let member = MemberMapper::to_domain(row()).unwrap();

        assert_eq!(member.status, MemberStatus::Visitor);
        assert_eq!(member.joined_at, Utc.with_ymd_and_hms(2026, 9, 14, 10, 0, 0).unwrap());
        assert_eq!(member.email, None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut bad = row();
        bad.status = "deacon".to_string();

        assert!(matches!(
            MemberMapper::to_domain(bad),
            Err(RemoteError::Schema { collection: Collection::Members, .. })
        ));
    }

    #[test]
    fn test_patch_row_only_carries_changed_fields() {
        let patch = MemberMapper::to_patch_row(&MemberUpdate {
            status: Some(MemberStatus::Inactive),
            ..Default::default()
        });

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "status": "inactive" })
        );
    }
}
