//! # Requests
//!
//! Messages sent from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request understood by every `ResourceActor<T>`.
///
/// The CRUD variants use the associated types of [`ActorEntity`], so the payload of a
/// request always matches the record kind of the actor receiving it.
///
/// - **Create**: build a record from [`ActorEntity::Create`], answer with the new id.
/// - **Get**: fetch one record.
/// - **List**: snapshot of every stored record, ordered by id.
/// - **Update**: apply [`ActorEntity::Update`], answer with the updated record.
/// - **Delete**: remove a record.
/// - **Action**: run an [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
