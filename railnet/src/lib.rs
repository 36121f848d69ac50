//! Railway network model and timetable console.
//!
//! Models named lines (ordered station sequences) carrying per-train
//! schedules, and answers structural queries: the stations of a line, the
//! lines of a station, the schedules departing a terminus, the trains
//! passing a station, and the best schedule between two stations before a
//! deadline.

pub mod console;
pub mod domain;
pub mod network;
pub mod persist;
