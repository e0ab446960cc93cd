//! Lazy population of virtual rows.
//!
//! Rows of a virtual container start out [`Uncached`]. The first time
//! anything reads their content, the container calls the application's data
//! provider for that row. A row moves through these states:
//!
//! ```text
//! Uncached --check_data--> Populating --provider returns--> Cached
//!    ^                                                        |
//!    +------------------------- clear ------------------------+
//! ```
//!
//! The provider receives the container mutably. It may set content on the
//! row, read other rows (populating them in turn), or dispose the whole
//! container. It may not remove the row it is populating; that fails with
//! [`ItemError::IllegalRemovalDuringPopulation`].
//!
//! [`Uncached`]: crate::row::PopulationState::Uncached
//! [`ItemError::IllegalRemovalDuringPopulation`]: crate::error::ItemError::IllegalRemovalDuringPopulation

use std::sync::Arc;

use grove_core::logging::targets;

use crate::container::ItemContainer;
use crate::error::{ItemError, Result};
use crate::id::RowId;
use crate::row::PopulationState;

/// Application callback that fills in a virtual row.
///
/// Called with the container, the row, and the row's position among its
/// siblings.
pub type DataProvider<C> = Arc<dyn Fn(&mut C, RowId, usize) + Send + Sync>;

/// Outcome of making sure a row has content.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    /// The row is live and its content can be read.
    Ready(RowId),
    /// The row or its container was disposed, possibly by the provider.
    Disposed,
}

impl Population {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Turn a disposal into [`ItemError::DisposedAccess`].
    pub fn into_result(self) -> Result<RowId> {
        match self {
            Self::Ready(row) => Ok(row),
            Self::Disposed => Err(ItemError::DisposedAccess),
        }
    }
}

/// Populate `row` if it is uncached.
///
/// Rows of non-virtual containers are marked cached without calling the
/// provider. A row already populating is reported ready, so the provider can
/// read back what it has set so far.
pub(crate) fn check_data<C: ItemContainer>(container: &mut C, row: RowId) -> Population {
    check_data_at(container, row, None)
}

/// [`check_data`] for a caller that already knows the row's sibling index.
pub(crate) fn check_data_at<C: ItemContainer>(
    container: &mut C,
    row: RowId,
    index_hint: Option<usize>,
) -> Population {
    let core = container.core_mut();
    if core.disposed {
        return Population::Disposed;
    }
    let virtual_items = core.style.virtual_items;
    let Some(data) = core.rows.get_mut(row) else {
        return Population::Disposed;
    };

    match data.state {
        PopulationState::Cached | PopulationState::Populating => return Population::Ready(row),
        PopulationState::Uncached if !virtual_items => {
            data.state = PopulationState::Cached;
            return Population::Ready(row);
        }
        PopulationState::Uncached => data.state = PopulationState::Populating,
    }

    let provider = core.provider.clone();
    let index = container.sibling_index(row, index_hint).unwrap_or(0);
    tracing::trace!(target: targets::POPULATION, %row, index, "populating row");

    if let Some(provider) = provider {
        provider(container, row, index);
    }

    let core = container.core_mut();
    if core.disposed {
        tracing::debug!(target: targets::POPULATION, %row, "container disposed during population");
        return Population::Disposed;
    }
    match core.rows.get_mut(row) {
        Some(data) => {
            data.state = PopulationState::Cached;
            Population::Ready(row)
        }
        None => Population::Disposed,
    }
}
