use chrono::Utc;
use huddle_core::{CONSTANT_ROOM_CODE, NewMeeting};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::store::MeetingStore;

const CONSTANT_TITLE: &str = "Constant Meeting";
const CONSTANT_CREATOR: &str = "admin";

/// Makes sure the always-on room exists. Safe to run on every startup.
pub async fn seed_constant_meeting(store: &dyn MeetingStore) -> Result<bool, ServerError> {
    let meeting = NewMeeting::new(CONSTANT_ROOM_CODE, CONSTANT_TITLE, CONSTANT_CREATOR)
        .into_meeting(Utc::now())?;

    let inserted = store.ensure_meeting(meeting).await?;
    if inserted {
        info!("Seeded {} meeting", CONSTANT_ROOM_CODE);
    } else {
        debug!("{} meeting already present", CONSTANT_ROOM_CODE);
    }
    Ok(inserted)
}
