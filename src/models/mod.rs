//! Data models for ZenFlow
//!
//! This module contains all the data structures used throughout the
//! application, including database entities and request/response types.

pub mod draft;
pub mod event;
pub mod registration;

pub use draft::{DraftSnapshot, EventDraft};
pub use event::{
    AiEnhancement, CurriculumWeek, Event, EventFilter, EventLookup, EventStatus, Facilitator,
    FaqItem, ListParams, Pagination, ProgramStats, SectionVisibility, SortOrder, TextTestimonial,
    UpcomingSession, UpdateEventRequest, VideoTestimonial,
};
pub use registration::{
    CreateRegistrationRequest, Registration, RegistrationFilter, RegistrationLookup,
    RegistrationStatus,
};
