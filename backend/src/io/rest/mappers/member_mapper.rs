use chrono::Utc;
use shared::{CreateMemberRequest, Member as MemberDto, UpdateMemberRequest};

use crate::domain::models::{Member, MemberUpdate, NewMember};
use crate::io::rest::error::ApiError;

use super::parse_timestamp;

pub struct MemberMapper;

impl MemberMapper {
    pub fn to_dto(domain: Member) -> MemberDto {
        MemberDto {
            id: domain.id,
            name: domain.name,
            email: domain.email,
            phone: domain.phone,
            status: domain.status,
            joined_at: domain.joined_at.to_rfc3339(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    /// A missing `joined_at` means the member joins today.
    pub fn to_new(request: CreateMemberRequest) -> Result<NewMember, ApiError> {
        let joined_at = match request.joined_at.as_deref() {
            Some(value) => parse_timestamp("joined_at", value)?,
            None => Utc::now(),
        };

        Ok(NewMember {
            name: request.name,
            email: request.email,
            phone: request.phone,
            status: request.status,
            joined_at,
        })
    }

    pub fn to_update(request: UpdateMemberRequest) -> Result<MemberUpdate, ApiError> {
        Ok(MemberUpdate {
            joined_at: request
                .joined_at
                .as_deref()
                .map(|value| parse_timestamp("joined_at", value))
                .transpose()?,
            name: request.name,
            email: request.email,
            phone: request.phone,
            status: request.status,
        })
    }
}
