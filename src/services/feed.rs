use crate::domain::auth::Principal;
use crate::domain::feed::{FeedEntry, FeedKind, UpdateFeedEntry};
use crate::forms::feed::{AddFeedEntryForm, EditFeedEntryForm};
use crate::repository::{FeedReader, FeedWriter};
use crate::services::access::{Action, authorize};
use crate::services::pagination::{FEED_PAGE_SIZE, Page, PageParams};
use crate::services::{ServiceError, ServiceResult};

fn not_found(kind: FeedKind) -> ServiceError {
    ServiceError::NotFound(format!("{} not found.", kind.label()))
}

/// The caller's notifications or updates, newest first.
pub fn list_feed<R>(
    repo: &R,
    principal: &Principal,
    kind: FeedKind,
    params: &PageParams,
) -> ServiceResult<Page<FeedEntry>>
where
    R: FeedReader + ?Sized,
{
    let pagination = params.pagination(FEED_PAGE_SIZE)?;
    let (total, items) = repo
        .list_feed(kind, principal.user_id, Some(pagination.clone()))
        .map_err(ServiceError::from)?;

    Page::new(total, &pagination, items)
}

pub fn create_feed_entry<R>(
    repo: &R,
    principal: &Principal,
    kind: FeedKind,
    form: AddFeedEntryForm,
) -> ServiceResult<FeedEntry>
where
    R: FeedWriter + ?Sized,
{
    let new_entry = form.into_new_entry(principal.user_id)?;
    repo.create_feed_entry(kind, &new_entry)
        .map_err(ServiceError::from)
}

fn owned_entry<R>(
    repo: &R,
    principal: &Principal,
    kind: FeedKind,
    action: Action,
    entry_id: i32,
) -> ServiceResult<FeedEntry>
where
    R: FeedReader + ?Sized,
{
    let entry = repo
        .get_feed_entry(kind, entry_id)
        .map_err(ServiceError::from)?
        .ok_or_else(|| not_found(kind))?;

    authorize(principal, action, &entry).into_result(|| not_found(kind))?;
    Ok(entry)
}

pub fn get_feed_entry<R>(
    repo: &R,
    principal: &Principal,
    kind: FeedKind,
    entry_id: i32,
) -> ServiceResult<FeedEntry>
where
    R: FeedReader + ?Sized,
{
    owned_entry(repo, principal, kind, Action::View, entry_id)
}

/// Flags an entry as read. Marking an already read entry again succeeds
/// without writing.
pub fn mark_feed_entry_read<R>(
    repo: &R,
    principal: &Principal,
    kind: FeedKind,
    entry_id: i32,
) -> ServiceResult<FeedEntry>
where
    R: FeedReader + FeedWriter + ?Sized,
{
    let entry = owned_entry(repo, principal, kind, Action::Edit, entry_id)?;
    if entry.is_read {
        return Ok(entry);
    }

    repo.update_feed_entry(
        kind,
        entry.id,
        principal.user_id,
        &UpdateFeedEntry::mark_read(),
    )
    .map_err(|err| match ServiceError::from(err) {
        ServiceError::NotFound(_) => not_found(kind),
        other => other,
    })
}

pub fn edit_feed_entry<R>(
    repo: &R,
    principal: &Principal,
    kind: FeedKind,
    entry_id: i32,
    form: EditFeedEntryForm,
) -> ServiceResult<FeedEntry>
where
    R: FeedReader + FeedWriter + ?Sized,
{
    let entry = owned_entry(repo, principal, kind, Action::Edit, entry_id)?;
    let updates = form.into_update()?;

    repo.update_feed_entry(kind, entry.id, principal.user_id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_feed_entry<R>(
    repo: &R,
    principal: &Principal,
    kind: FeedKind,
    entry_id: i32,
) -> ServiceResult<()>
where
    R: FeedReader + FeedWriter + ?Sized,
{
    let entry = owned_entry(repo, principal, kind, Action::Edit, entry_id)?;

    repo.delete_feed_entry(kind, entry.id, principal.user_id)
        .map_err(ServiceError::from)
}
