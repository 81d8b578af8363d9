//! JPEG container access
//!
//! Only the APP1 EXIF segment is ever replaced; entropy-coded image data is
//! written back byte for byte.

use crate::error::{Error, Result};
use crate::time::exif::MetadataBlock;
use img_parts::jpeg::{Jpeg, JpegSegment};
use img_parts::{Bytes, ImageEXIF};
use std::fs;
use std::path::{Path, PathBuf};

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const SOS: u8 = 0xDA;
const EXIF_PREFIX: &[u8] = b"Exif\0\0";

/// Start-of-frame markers; C4, C8 and CC share the range but are not frames
fn is_frame_header(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

fn is_exif_segment(segment: &JpegSegment) -> bool {
    segment.marker() == APP1 && segment.contents().starts_with(EXIF_PREFIX)
}

/// A JPEG file loaded into memory as a list of segments
pub struct JpegFile {
    path: PathBuf,
    jpeg: Jpeg,
}

impl JpegFile {
    /// Read and split `path` into segments
    ///
    /// Fails with [`Error::NotJpeg`] when the file lacks the JPEG signature,
    /// and with [`Error::ImageDecode`] when it has no frame header or scan.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        if !bytes.starts_with(&SOI) {
            return Err(Error::NotJpeg {
                path: path.to_path_buf(),
            });
        }

        let jpeg = Jpeg::from_bytes(Bytes::from(bytes)).map_err(|e| Error::ImageDecode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let segments = jpeg.segments();
        if !segments.iter().any(|s| is_frame_header(s.marker())) {
            return Err(Error::ImageDecode {
                path: path.to_path_buf(),
                message: "missing frame header".to_string(),
            });
        }
        if !segments.iter().any(|s| s.marker() == SOS) {
            return Err(Error::ImageDecode {
                path: path.to_path_buf(),
                message: "missing image scan".to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            jpeg,
        })
    }

    /// The embedded EXIF block, `None` when the file has no APP1 EXIF segment
    pub fn metadata(&self) -> Result<Option<MetadataBlock>> {
        let Some(raw) = self.jpeg.exif() else {
            return Ok(None);
        };

        MetadataBlock::from_tiff(raw.to_vec())
            .map(Some)
            .map_err(|e| Error::ExifRead {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    /// Replace the EXIF block with `metadata`
    ///
    /// The APP1 segment goes right after SOI, or after leading APP0 (JFIF)
    /// segments.
    pub fn set_metadata(&mut self, metadata: &MetadataBlock) -> Result<()> {
        let tiff = metadata.to_tiff().map_err(|e| Error::ExifWrite {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let mut contents = Vec::with_capacity(EXIF_PREFIX.len() + tiff.len());
        contents.extend_from_slice(EXIF_PREFIX);
        contents.extend_from_slice(&tiff);
        let segment = JpegSegment::new_with_contents(APP1, Bytes::from(contents));

        let segments = self.jpeg.segments_mut();
        segments.retain(|s| !is_exif_segment(s));
        let index = segments
            .iter()
            .position(|s| s.marker() != APP0)
            .unwrap_or(segments.len());
        segments.insert(index, segment);
        Ok(())
    }

    /// Write the container back over the file it was read from
    pub fn save(self) -> Result<()> {
        let bytes = self.jpeg.encoder().bytes();
        fs::write(&self.path, &bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn write_plain_jpeg(path: &Path) {
        let img = image::RgbImage::from_fn(16, 16, |x, y| {
            image::Rgb([(x * 16) as u8, (y * 16) as u8, 128])
        });
        img.save_with_format(path, image::ImageFormat::Jpeg).unwrap();
    }

    fn markers(jpeg: &JpegFile) -> Vec<u8> {
        jpeg.jpeg.segments().iter().map(|s| s.marker()).collect()
    }

    #[test]
    fn test_open_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a jpeg").unwrap();
        file.flush().unwrap();

        let err = JpegFile::open(file.path()).err().unwrap();
        assert!(matches!(err, Error::NotJpeg { .. }));
    }

    #[test]
    fn test_open_rejects_bare_markers() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xFF\xD8\xFF\xD9").unwrap();
        file.flush().unwrap();

        let err = JpegFile::open(file.path()).err().unwrap();
        assert!(matches!(err, Error::ImageDecode { .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let err = JpegFile::open(&dir.path().join("missing.jpg")).err().unwrap();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_plain_jpeg_has_no_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        write_plain_jpeg(&path);

        let jpeg = JpegFile::open(&path).unwrap();
        assert!(jpeg.metadata().unwrap().is_none());
    }

    #[test]
    fn test_exif_segment_follows_jfif_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        write_plain_jpeg(&path);

        let mut block = MetadataBlock::empty();
        block.set_date_time_original("2021:03:15 14:30:05");
        let mut jpeg = JpegFile::open(&path).unwrap();
        jpeg.set_metadata(&block).unwrap();
        jpeg.save().unwrap();

        let jpeg = JpegFile::open(&path).unwrap();
        let markers = markers(&jpeg);
        let first_other = markers.iter().position(|&m| m != APP0).unwrap();
        assert_eq!(markers[first_other], APP1);
        assert_eq!(markers.iter().filter(|&&m| m == APP1).count(), 1);
    }

    #[test]
    fn test_replacing_metadata_keeps_one_exif_segment() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        write_plain_jpeg(&path);

        let mut jpeg = JpegFile::open(&path).unwrap();
        let mut block = MetadataBlock::empty();
        block.set_date_time_original("2000:01:01 00:00:00");
        jpeg.set_metadata(&block).unwrap();
        block.set_date_time_original("2021:03:15 14:30:05");
        jpeg.set_metadata(&block).unwrap();

        let exif_segments = jpeg
            .jpeg
            .segments()
            .iter()
            .filter(|s| is_exif_segment(s))
            .count();
        assert_eq!(exif_segments, 1);
        assert_eq!(
            jpeg.metadata().unwrap().unwrap().date_time_original_bytes(),
            Some(&b"2021:03:15 14:30:05"[..])
        );
    }

    #[test]
    fn test_metadata_round_trip_keeps_pixels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        write_plain_jpeg(&path);
        let before = image::open(&path).unwrap().to_rgb8();

        let mut block = MetadataBlock::empty();
        block.set_date_time_original("2021:03:15 14:30:05");
        let mut jpeg = JpegFile::open(&path).unwrap();
        jpeg.set_metadata(&block).unwrap();
        jpeg.save().unwrap();

        let jpeg = JpegFile::open(&path).unwrap();
        let metadata = jpeg.metadata().unwrap().unwrap();
        assert_eq!(
            metadata.date_time_original_bytes(),
            Some(&b"2021:03:15 14:30:05"[..])
        );

        let after = image::open(&path).unwrap().to_rgb8();
        assert_eq!(before.as_raw(), after.as_raw());
    }
}
