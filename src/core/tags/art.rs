use std::path::Path;

use id3::Tag;
use id3::frame::Content;
use log::debug;

/// Returns (image_bytes, mime) for the first embedded picture (APIC/PIC).
/// A file without a tag or without a picture has no art; that's not an error.
pub fn read_embedded_art(path: &Path) -> Option<(Vec<u8>, String)> {
    let tag = match Tag::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            debug!("no cover art in {}: {e}", path.display());
            return None;
        }
    };

    for f in tag.frames() {
        if f.id() != "APIC" && f.id() != "PIC" {
            continue;
        }
        if let Content::Picture(p) = f.content() {
            return Some((p.data.clone(), p.mime_type.clone()));
        }
    }

    debug!("tag has no picture frame: {}", path.display());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3::frame::{Picture, PictureType};
    use id3::{TagLike, Version};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn returns_first_picture() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("art.mp3");
        fs::write(&path, [0xFFu8; 32]).unwrap();

        let mut tag = Tag::new();
        tag.add_frame(Picture {
            mime_type: "image/png".to_string(),
            picture_type: PictureType::CoverFront,
            description: String::new(),
            data: vec![1, 2, 3, 4],
        });
        tag.write_to_path(&path, Version::Id3v23).unwrap();

        let (bytes, mime) = read_embedded_art(&path).unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 4]);
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn tag_without_picture_has_no_art() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plain.mp3");
        fs::write(&path, [0xFFu8; 32]).unwrap();

        let mut tag = Tag::new();
        tag.set_title("No art");
        tag.write_to_path(&path, Version::Id3v24).unwrap();

        assert!(read_embedded_art(&path).is_none());
    }

    #[test]
    fn untagged_file_has_no_art() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("raw.mp3");
        fs::write(&path, [0u8; 32]).unwrap();

        assert!(read_embedded_art(&path).is_none());
    }
}
