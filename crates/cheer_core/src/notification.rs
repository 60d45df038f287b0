//! Push content for cheers

use crate::random::RandomSource;
use cheer_common::{PushPayload, PushRequest, BADGE_INCREMENT};
use cheer_db::Cheer;
use std::collections::HashMap;

pub const CHEER_TITLE: &str = "Merry Christmas!";

/// Sounds bundled with the app, one is picked per push
pub const CHEER_SOUNDS: [&str; 4] = [
    "sleighbells.wav",
    "merry_christmas_darling.wav",
    "merry_christmas.mp3",
    "santa_laugh.wav",
];

pub fn random_sound(random: &dyn RandomSource) -> &'static str {
    let index = random.below(CHEER_SOUNDS.len() as u64) as usize;
    CHEER_SOUNDS.get(index).copied().unwrap_or(CHEER_SOUNDS[0])
}

/// Push announcing `cheer` to its recipient
///
/// `originalNoteId` is the cheer itself for initiators and the answered cheer for
/// responses, so the app can always open the conversation's first note.
pub fn cheer_push(cheer: &Cheer, sound: &str) -> PushRequest {
    let original_note_id = cheer
        .initiation_note_id
        .clone()
        .unwrap_or_else(|| cheer.id.clone());

    let data = HashMap::from([
        ("fromUserId".to_string(), cheer.from_user_id.clone()),
        ("fromInstallationId".to_string(), cheer.from_installation_id.clone()),
        ("fromName".to_string(), cheer.from_name.clone()),
        ("fromLocation".to_string(), cheer.from_location.clone()),
        ("toInstallationId".to_string(), cheer.to_installation_id.clone()),
        ("originalNoteId".to_string(), original_note_id),
        ("isResponse".to_string(), (!cheer.is_initiator()).to_string()),
    ]);

    PushRequest {
        installation_id: cheer.to_installation_id.clone(),
        payload: PushPayload {
            title: CHEER_TITLE.to_string(),
            body: cheer.message.clone(),
            sound: Some(sound.to_string()),
            badge: Some(BADGE_INCREMENT.to_string()),
            data,
        },
    }
}
