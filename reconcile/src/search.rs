//! Finding one policy in a per-object list. First match wins.

use catalog_client::{Member, PolicyEntry, PolicyList};

fn matches(entry: &PolicyEntry, member: &str, column: Option<&str>) -> bool {
    entry.member == member && column.is_none_or(|c| entry.column == c)
}

fn find_in<'a>(entries: &'a [PolicyEntry], member: &str, column: Option<&str>) -> Option<&'a PolicyEntry> {
    entries.iter().find(|e| matches(e, member, column))
}

/// Looks only in the partition of the declared member kind.
pub fn find_created<'a>(list: &'a PolicyList, member: &Member, column: Option<&str>) -> Option<&'a PolicyEntry> {
    let partition = match member {
        Member::User(_) => &list.users,
        Member::Group(_) => &list.groups
    };
    find_in(partition, member.name(), column)
}

/// Looks in users, then groups. Used when the member kind is not known; the
/// returned [`Member`] tells which partition matched.
pub fn find_existing<'a>(
    list: &'a PolicyList,
    member: &str,
    column: Option<&str>
) -> Option<(Member, &'a PolicyEntry)> {
    if let Some(entry) = find_in(&list.users, member, column) {
        return Some((Member::User(entry.member.clone()), entry));
    }
    find_in(&list.groups, member, column).map(|entry| (Member::Group(entry.member.clone()), entry))
}
