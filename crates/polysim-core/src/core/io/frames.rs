use crate::core::models::chain::Chain;
use crate::core::models::system::System;
use std::io::{self, Write};

/// Writes one frame as JSON: an array of chains, each an array of `[x,y,z]`
/// locations in monomer order.
///
/// Non-finite components have no JSON form and come out as `null`; the
/// simulation workflow refuses to record such frames.
pub fn write_frame<W: Write>(system: &System, writer: &mut W) -> io::Result<()> {
    let frame: Vec<&[_]> = system.chains().iter().map(Chain::locations).collect();
    serde_json::to_writer(writer, &frame)?;
    Ok(())
}

/// Streams a recording of frames.
///
/// Frames are comma separated and the whole recording is wrapped in one outer
/// array, so a finished recording with no frames is `[]`.
#[derive(Debug)]
pub struct FrameRecorder<W: Write> {
    writer: W,
    frames: usize,
}

impl<W: Write> FrameRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    pub fn record(&mut self, system: &System) -> io::Result<()> {
        self.writer
            .write_all(if self.frames == 0 { b"[" } else { b"," })?;
        write_frame(system, &mut self.writer)?;
        self.frames += 1;
        Ok(())
    }

    pub fn frames_recorded(&self) -> usize {
        self.frames
    }

    /// Closes the outer array, flushes, and hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        if self.frames == 0 {
            self.writer.write_all(b"[")?;
        }
        self.writer.write_all(b"]")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::vector::Vec3;
    use std::fs::File;
    use std::io::BufWriter;

    type Recording = Vec<Vec<Vec<[f64; 3]>>>;

    fn sample_system() -> System {
        System::from_chains(vec![
            Chain::from_locations(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.5, -2.0)]),
            Chain::from_locations(vec![Vec3::new(0.0, 1.0, 0.0)]),
        ])
    }

    fn to_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn write_frame_produces_nested_location_arrays() {
        let mut out = Vec::new();
        write_frame(&sample_system(), &mut out).unwrap();
        assert_eq!(
            to_string(out),
            "[[[0.0,0.0,0.0],[1.0,0.5,-2.0]],[[0.0,1.0,0.0]]]"
        );
    }

    #[test]
    fn non_finite_components_are_written_as_null() {
        let system = System::from_chains(vec![Chain::from_locations(vec![Vec3::new(
            f64::NAN,
            f64::INFINITY,
            1.0,
        )])]);
        let mut out = Vec::new();
        write_frame(&system, &mut out).unwrap();

        let text = to_string(out);
        assert_eq!(text, "[[[null,null,1.0]]]");
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
    }

    #[test]
    fn recorder_separates_frames_and_wraps_them() {
        let mut recorder = FrameRecorder::new(Vec::new());
        recorder.record(&sample_system()).unwrap();
        recorder.record(&System::from_chains(vec![Chain::new(1)])).unwrap();
        assert_eq!(recorder.frames_recorded(), 2);

        let out = to_string(recorder.finish().unwrap());
        let frames: Recording = serde_json::from_str(&out).unwrap();
        assert_eq!(
            frames,
            vec![
                vec![
                    vec![[0.0, 0.0, 0.0], [1.0, 0.5, -2.0]],
                    vec![[0.0, 1.0, 0.0]],
                ],
                vec![vec![[0.0, 0.0, 0.0]]],
            ]
        );
    }

    #[test]
    fn empty_recording_is_an_empty_array() {
        let recorder = FrameRecorder::new(Vec::new());
        assert_eq!(to_string(recorder.finish().unwrap()), "[]");
    }

    #[test]
    fn recorder_flushes_a_buffered_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.json");

        let file = BufWriter::new(File::create(&path).unwrap());
        let mut recorder = FrameRecorder::new(file);
        recorder.record(&sample_system()).unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let frames: Recording = serde_json::from_str(&content).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0][0][1], [1.0, 0.5, -2.0]);
    }
}
