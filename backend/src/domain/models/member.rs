//! Domain model for a church member.
use chrono::{DateTime, Utc};
use shared::MemberStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to register a member; id and created_at are assigned remotely
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
}

/// Partial update; `None` leaves the field untouched, and for optional
/// columns `Some(None)` clears it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub status: Option<MemberStatus>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn from_new(id: String, new: NewMember, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            status: new.status,
            joined_at: new.joined_at,
            created_at,
        }
    }

    pub fn apply(&mut self, update: MemberUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(joined_at) = update.joined_at {
            self.joined_at = joined_at;
        }
    }
}
