//! In-memory DICOM streams for tests

use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use dicom_dictionary_std::{tags, uids};

const SOP_INSTANCE_UID: &str = "1.2.826.0.1.3680043.2.1125.1.420";

pub(crate) struct DicomFixture {
    rows: u16,
    cols: u16,
    bits_allocated: u16,
    signed: bool,
    photometric: &'static str,
    samples_per_pixel: u16,
    rescale: Option<(f64, f64)>,
    frames: Option<u32>,
    transfer_syntax: &'static str,
    pixels: PrimitiveValue,
}

impl DicomFixture {
    fn new(rows: u16, cols: u16, bits_allocated: u16, signed: bool, pixels: PrimitiveValue) -> Self {
        Self {
            rows,
            cols,
            bits_allocated,
            signed,
            photometric: "MONOCHROME2",
            samples_per_pixel: 1,
            rescale: None,
            frames: None,
            transfer_syntax: uids::EXPLICIT_VR_LITTLE_ENDIAN,
            pixels,
        }
    }

    pub(crate) fn u8_frame(cols: u16, rows: u16, samples: &[u8]) -> Self {
        Self::new(rows, cols, 8, false, PrimitiveValue::from(samples.to_vec()))
    }

    pub(crate) fn u16_frame(cols: u16, rows: u16, samples: &[u16]) -> Self {
        Self::new(rows, cols, 16, false, PrimitiveValue::U16(samples.iter().copied().collect()))
    }

    pub(crate) fn i16_frame(cols: u16, rows: u16, samples: &[i16]) -> Self {
        Self::new(rows, cols, 16, true, PrimitiveValue::I16(samples.iter().copied().collect()))
    }

    pub(crate) fn rescale(mut self, slope: f64, intercept: f64) -> Self {
        self.rescale = Some((slope, intercept));
        self
    }

    pub(crate) fn frames(mut self, frames: u32) -> Self {
        self.frames = Some(frames);
        self
    }

    pub(crate) fn big_endian(mut self) -> Self {
        self.transfer_syntax = uids::EXPLICIT_VR_BIG_ENDIAN;
        self
    }

    pub(crate) fn color(mut self, photometric: &'static str, samples_per_pixel: u16) -> Self {
        self.photometric = photometric;
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    /// Serialize as a Part 10 stream (preamble, magic, meta group, data set)
    pub(crate) fn build(self) -> Vec<u8> {
        let mut obj = InMemDicomObject::new_empty();
        let us = |tag, value: u16| DataElement::new(tag, VR::US, PrimitiveValue::from(value));

        obj.put(DataElement::new(
            tags::SOP_CLASS_UID,
            VR::UI,
            PrimitiveValue::from(uids::SECONDARY_CAPTURE_IMAGE_STORAGE),
        ));
        obj.put(DataElement::new(
            tags::SOP_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(SOP_INSTANCE_UID),
        ));
        obj.put(DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("OT")));
        obj.put(us(tags::SAMPLES_PER_PIXEL, self.samples_per_pixel));
        obj.put(DataElement::new(
            tags::PHOTOMETRIC_INTERPRETATION,
            VR::CS,
            PrimitiveValue::from(self.photometric),
        ));
        obj.put(us(tags::ROWS, self.rows));
        obj.put(us(tags::COLUMNS, self.cols));
        obj.put(us(tags::BITS_ALLOCATED, self.bits_allocated));
        obj.put(us(tags::BITS_STORED, self.bits_allocated));
        obj.put(us(tags::HIGH_BIT, self.bits_allocated - 1));
        obj.put(us(tags::PIXEL_REPRESENTATION, u16::from(self.signed)));
        if self.samples_per_pixel > 1 {
            obj.put(us(tags::PLANAR_CONFIGURATION, 0));
        }
        if let Some(frames) = self.frames {
            obj.put(DataElement::new(
                tags::NUMBER_OF_FRAMES,
                VR::IS,
                PrimitiveValue::from(frames.to_string()),
            ));
        }
        if let Some((slope, intercept)) = self.rescale {
            obj.put(DataElement::new(
                tags::RESCALE_SLOPE,
                VR::DS,
                PrimitiveValue::from(slope.to_string()),
            ));
            obj.put(DataElement::new(
                tags::RESCALE_INTERCEPT,
                VR::DS,
                PrimitiveValue::from(intercept.to_string()),
            ));
        }

        let pixel_vr = if self.bits_allocated == 8 { VR::OB } else { VR::OW };
        obj.put(DataElement::new(
            tags::PIXEL_DATA,
            pixel_vr,
            self.pixels,
        ));

        let file_obj = obj
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax(self.transfer_syntax)
                    .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
                    .media_storage_sop_instance_uid(SOP_INSTANCE_UID),
            )
            .expect("fixture meta group should be complete");

        let mut out = Vec::new();
        file_obj
            .write_all(&mut out)
            .expect("fixture should serialize");
        out
    }
}
