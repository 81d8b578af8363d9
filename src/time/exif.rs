//! EXIF metadata block
//!
//! Wraps the fields of a TIFF-structured EXIF block as read by
//! `kamadak-exif`, and serializes them back with its experimental writer.

use exif::experimental::Writer;
use exif::{Context, Exif, Field, In, Reader, Tag, Value};
use std::io::Cursor;
use tracing::{debug, trace};

/// Tags describing the layout of the block rather than its content.
/// The writer regenerates them.
const STRUCTURAL_TAGS: &[Tag] = &[
    Tag::ExifIFDPointer,
    Tag::GPSInfoIFDPointer,
    Tag::InteropIFDPointer,
    Tag::StripOffsets,
    Tag::StripByteCounts,
    Tag::TileOffsets,
    Tag::TileByteCounts,
    Tag::JPEGInterchangeFormat,
    Tag::JPEGInterchangeFormatLength,
];

/// Top-level partition a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// 0th IFD
    Image,
    /// 1st IFD
    Thumbnail,
    /// Exif IFD (camera settings, capture dates)
    Camera,
    /// GPS IFD
    Gps,
    /// Interoperability IFD
    Interop,
}

impl Category {
    pub fn of(field: &Field) -> Category {
        match field.tag.context() {
            Context::Exif => Category::Camera,
            Context::Gps => Category::Gps,
            Context::Interop => Category::Interop,
            _ if field.ifd_num == In::PRIMARY => Category::Image,
            _ => Category::Thumbnail,
        }
    }
}

/// Editable EXIF block
#[derive(Debug)]
pub struct MetadataBlock {
    fields: Vec<Field>,
    thumbnail: Option<Vec<u8>>,
    little_endian: bool,
}

impl MetadataBlock {
    /// Block with no fields in any category, written big-endian
    pub fn empty() -> Self {
        Self {
            fields: Vec::new(),
            thumbnail: None,
            little_endian: false,
        }
    }

    /// Parse a raw TIFF-structured block (the APP1 payload after `Exif\0\0`)
    pub fn from_tiff(raw: Vec<u8>) -> Result<Self, exif::Error> {
        let exif = Reader::new().read_raw(raw)?;
        let thumbnail = thumbnail_bytes(&exif);

        let mut fields = Vec::new();
        for field in exif.fields() {
            if STRUCTURAL_TAGS.contains(&field.tag) {
                continue;
            }
            // The writer refuses values it could not decode
            if let Value::Unknown(..) = field.value {
                debug!(tag = %field.tag, "Dropping EXIF field of unknown type");
                continue;
            }
            fields.push(Field {
                tag: field.tag,
                ifd_num: field.ifd_num,
                value: field.value.clone(),
            });
        }

        trace!(count = fields.len(), "Loaded EXIF fields");

        Ok(Self {
            fields,
            thumbnail,
            little_endian: exif.little_endian(),
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields belonging to one category
    pub fn fields_in(&self, category: Category) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(move |f| Category::of(f) == category)
    }

    pub fn little_endian(&self) -> bool {
        self.little_endian
    }

    /// The camera-level DateTimeOriginal field of the primary image
    pub fn date_time_original(&self) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.tag == Tag::DateTimeOriginal && f.ifd_num == In::PRIMARY)
    }

    pub fn has_date_time_original(&self) -> bool {
        self.date_time_original().is_some()
    }

    /// Raw bytes of DateTimeOriginal, if it is an ASCII value
    pub fn date_time_original_bytes(&self) -> Option<&[u8]> {
        match self.date_time_original()?.value {
            Value::Ascii(ref values) => values.first().map(|v| v.as_slice()),
            _ => None,
        }
    }

    /// Set DateTimeOriginal to `timestamp`, replacing any existing value
    pub fn set_date_time_original(&mut self, timestamp: &str) {
        self.fields
            .retain(|f| !(f.tag == Tag::DateTimeOriginal && f.ifd_num == In::PRIMARY));
        self.fields.push(Field {
            tag: Tag::DateTimeOriginal,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![timestamp.as_bytes().to_vec()]),
        });
    }

    /// Serialize back to a raw TIFF-structured block
    pub fn to_tiff(&self) -> Result<Vec<u8>, exif::Error> {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }
        if let Some(ref jpeg) = self.thumbnail {
            writer.set_jpeg(jpeg, In::THUMBNAIL);
        }

        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, self.little_endian)?;
        Ok(buf.into_inner())
    }
}

/// Embedded thumbnail JPEG referenced by the 1st IFD
fn thumbnail_bytes(exif: &Exif) -> Option<Vec<u8>> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let length = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;

    let bytes = exif.buf().get(offset..offset.checked_add(length)?);
    if bytes.is_none() {
        debug!(offset, length, "Thumbnail reference out of bounds, dropping");
    }
    bytes.map(|b| b.to_vec())
}
