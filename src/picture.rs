// Picture update flow: show the current picture, read pfp.jpg, ask for
// confirmation, upload, show the new picture.

use crate::client::MessagingClient;
use crate::error::{Error, Result};
use crate::types::{Jid, PictureInfo, PictureParams};
use crate::ui::{self, Terminal};
use std::path::Path;
use tracing::info;

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The user did not answer `y`; nothing was changed.
    Declined,
    Updated {
        old: Option<PictureInfo>,
        new: Option<PictureInfo>,
        picture_id: String,
    },
}

/// Read the picture at `path`, refusing anything that is not a JPEG.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    let image = std::fs::read(path).map_err(|source| Error::ImageUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if !image.starts_with(&JPEG_MAGIC) {
        return Err(Error::NotJpeg {
            path: path.to_path_buf(),
        });
    }
    Ok(image)
}

fn describe(info: &Option<PictureInfo>) -> &str {
    info.as_ref().map(|i| i.url.as_str()).unwrap_or("(none)")
}

/// Replace the profile picture of `jid` with the image at `image_path`.
pub fn update_picture<C, T>(client: &C, term: &mut T, jid: &Jid, image_path: &Path) -> Result<UpdateOutcome>
where
    C: MessagingClient + ?Sized,
    T: Terminal + ?Sized,
{
    let params = PictureParams::default();

    let old = client.picture_info(jid, &params)?;
    term.status(&format!("\nOld PFP: {}", describe(&old)));

    let image = read_image(image_path)?;

    let answer = term.confirm(ui::DISCLAIMER, ui::CONFIRM_PROMPT)?;
    if !ui::is_accept(&answer) {
        info!("update declined");
        return Ok(UpdateOutcome::Declined);
    }

    term.begin("Uploading...");
    let uploaded = client.set_picture(&image);
    term.finish();
    let picture_id = uploaded?;
    info!(%picture_id, "profile picture updated");
    term.status("\nUpdated profile picture");

    let new = client.picture_info(jid, &params)?;
    term.status(&format!("\nNew PFP: {}", describe(&new)));

    term.status("\nDone!");
    term.pause();

    Ok(UpdateOutcome::Updated { old, new, picture_id })
}
