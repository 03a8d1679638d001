use crate::error::{ReconcileError, ReconcileResult};
use catalog_client::Member;

/// Picks the member declared by a plan. Empty strings count as not supplied.
pub fn member_from_plan(user_email: Option<&str>, group_name: Option<&str>) -> ReconcileResult<Member> {
    let user = user_email.filter(|u| !u.is_empty());
    let group = group_name.filter(|g| !g.is_empty());

    match (user, group) {
        (Some(_), Some(_)) => Err(ReconcileError::BothMembers),
        (Some(user), None) => Ok(Member::User(user.to_string())),
        (None, Some(group)) => Ok(Member::Group(group.to_string())),
        (None, None) => Err(ReconcileError::NoMember)
    }
}

/// Recovers the member kind from a bare name: e-mail addresses are users.
pub fn infer_member(name: &str) -> Member {
    if name.contains('@') {
        Member::User(name.to_string())
    } else {
        Member::Group(name.to_string())
    }
}
