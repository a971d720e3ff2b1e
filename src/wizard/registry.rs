//! Section registry
//!
//! Declarative catalogue of the page sections an event can carry. Each entry
//! names its visibility flag and, where the section has content the page
//! cannot render without, a requirement predicate. Adding a section type
//! means adding an entry here; the validation engine never changes.

use crate::models::draft::EventDraft;

/// How a requirement inspects the draft.
///
/// `List` counts complete entries and demands at least one; entries with
/// blank mandatory fields do not count. `All` requires every check to pass,
/// for sections backed by a single object. `Any` is satisfied by one passing
/// check, which is how the stats card accepts any single populated figure.
pub enum RequirementKind {
    List(fn(&EventDraft) -> usize),
    All(&'static [fn(&EventDraft) -> bool]),
    Any(&'static [fn(&EventDraft) -> bool]),
}

/// A single mandatory-if-enabled rule
pub struct SectionRequirement {
    /// Visibility flag key the rule is gated on
    pub section_key: &'static str,
    /// Error map key reported to the form
    pub field_key: &'static str,
    pub message: &'static str,
    pub kind: RequirementKind,
}

impl SectionRequirement {
    pub fn is_satisfied(&self, draft: &EventDraft) -> bool {
        match &self.kind {
            RequirementKind::List(complete) => complete(draft) > 0,
            RequirementKind::All(checks) => checks.iter().all(|check| check(draft)),
            RequirementKind::Any(checks) => checks.iter().any(|check| check(draft)),
        }
    }
}

/// Registry of section requirements consulted by step-3 validation
pub struct SectionRegistry {
    requirements: Vec<SectionRequirement>,
}

impl SectionRegistry {
    /// The standard wellness program page sections
    pub fn standard() -> Self {
        Self {
            requirements: vec![
                SectionRequirement {
                    section_key: "benefitsSection",
                    field_key: "keyBenefits",
                    message: "At least one key benefit is required",
                    kind: RequirementKind::List(|draft| {
                        draft.key_benefits.iter().filter(|b| !b.trim().is_empty()).count()
                    }),
                },
                SectionRequirement {
                    section_key: "curriculumSection",
                    field_key: "curriculum",
                    message: "At least one complete curriculum week is required",
                    kind: RequirementKind::List(|draft| {
                        draft
                            .curriculum
                            .iter()
                            .filter(|week| {
                                !week.title.trim().is_empty()
                                    && !week.description.trim().is_empty()
                                    && week.lessons.iter().any(|l| !l.trim().is_empty())
                            })
                            .count()
                    }),
                },
                SectionRequirement {
                    section_key: "facilitatorCard",
                    field_key: "facilitator",
                    message: "Facilitator name, title and bio are required",
                    kind: RequirementKind::All(&[
                        |draft| !draft.facilitator.name.trim().is_empty(),
                        |draft| !draft.facilitator.title.trim().is_empty(),
                        |draft| !draft.facilitator.bio.trim().is_empty(),
                    ]),
                },
                SectionRequirement {
                    section_key: "videoTestimonialSection",
                    field_key: "videoTestimonial",
                    message: "Video testimonial title, description and video are required",
                    kind: RequirementKind::All(&[
                        |draft| !draft.video_testimonial.title.trim().is_empty(),
                        |draft| !draft.video_testimonial.description.trim().is_empty(),
                        |draft| !draft.video_testimonial.video_url.trim().is_empty(),
                    ]),
                },
                SectionRequirement {
                    section_key: "textTestimonialsSection",
                    field_key: "textTestimonials",
                    message: "At least one complete testimonial is required",
                    kind: RequirementKind::List(|draft| {
                        draft
                            .text_testimonials
                            .iter()
                            .filter(|t| {
                                !t.text.trim().is_empty()
                                    && t.rating > 0.0
                                    && !t.author_name.trim().is_empty()
                            })
                            .count()
                    }),
                },
                SectionRequirement {
                    section_key: "faqSection",
                    field_key: "faq",
                    message: "At least one FAQ is required",
                    kind: RequirementKind::List(|draft| {
                        draft
                            .faq
                            .iter()
                            .filter(|f| {
                                !f.question.trim().is_empty() && !f.answer.trim().is_empty()
                            })
                            .count()
                    }),
                },
                SectionRequirement {
                    section_key: "statsCard",
                    field_key: "stats",
                    message: "At least one stat is required",
                    kind: RequirementKind::Any(&[
                        |draft| draft.stats.total_graduates > 0,
                        |draft| !draft.stats.average_stress_reduction.trim().is_empty(),
                        |draft| !draft.stats.practice_retention.trim().is_empty(),
                        |draft| !draft.stats.recommendation_rate.trim().is_empty(),
                        |draft| draft.stats.countries_represented > 0,
                    ]),
                },
            ],
        }
    }

    pub fn requirements(&self) -> &[SectionRequirement] {
        &self.requirements
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{CurriculumWeek, FaqItem, TextTestimonial};

    fn rule<'a>(registry: &'a SectionRegistry, field_key: &str) -> &'a SectionRequirement {
        registry
            .requirements()
            .iter()
            .find(|r| r.field_key == field_key)
            .unwrap()
    }

    #[test]
    fn test_blank_faq_entries_do_not_count() {
        let registry = SectionRegistry::standard();
        let faq_rule = rule(&registry, "faq");

        let mut draft = EventDraft::empty();
        assert!(!faq_rule.is_satisfied(&draft));

        // An entry with empty question and answer is not an FAQ
        draft.faq.push(FaqItem::default());
        assert!(!faq_rule.is_satisfied(&draft));

        draft.faq.push(FaqItem {
            question: "Q".to_string(),
            answer: "A".to_string(),
        });
        assert!(faq_rule.is_satisfied(&draft));
    }

    #[test]
    fn test_curriculum_week_requires_lessons() {
        let registry = SectionRegistry::standard();
        let curriculum_rule = rule(&registry, "curriculum");

        let mut draft = EventDraft::empty();
        draft.curriculum.push(CurriculumWeek {
            week: "1".to_string(),
            title: "Foundations".to_string(),
            description: "Breath and attention".to_string(),
            lessons: Vec::new(),
        });
        assert!(!curriculum_rule.is_satisfied(&draft));

        draft.curriculum[0].lessons.push("Body scan".to_string());
        assert!(curriculum_rule.is_satisfied(&draft));
    }

    #[test]
    fn test_facilitator_requires_complete_profile() {
        let registry = SectionRegistry::standard();
        let facilitator_rule = rule(&registry, "facilitator");

        let mut draft = EventDraft::empty();
        draft.facilitator.name = "Ana Devi".to_string();
        draft.facilitator.title = "Lead Teacher".to_string();
        assert!(!facilitator_rule.is_satisfied(&draft));

        draft.facilitator.bio = "Twenty years of practice".to_string();
        assert!(facilitator_rule.is_satisfied(&draft));
    }

    #[test]
    fn test_video_testimonial_requires_all_fields() {
        let registry = SectionRegistry::standard();
        let video_rule = rule(&registry, "videoTestimonial");

        let mut draft = EventDraft::empty();
        draft.video_testimonial.video_url = "https://example.com/v.mp4".to_string();
        assert!(!video_rule.is_satisfied(&draft));

        draft.video_testimonial.title = "From burnout to balance".to_string();
        draft.video_testimonial.description = "A graduate's journey".to_string();
        assert!(video_rule.is_satisfied(&draft));
    }

    #[test]
    fn test_testimonial_requires_author_and_rating() {
        let registry = SectionRegistry::standard();
        let testimonials_rule = rule(&registry, "textTestimonials");

        let mut draft = EventDraft::empty();
        draft.text_testimonials.push(TextTestimonial {
            text: "Life changing".to_string(),
            ..Default::default()
        });
        assert!(!testimonials_rule.is_satisfied(&draft));

        draft.text_testimonials[0].rating = 5.0;
        draft.text_testimonials[0].author_name = "Maya Chen".to_string();
        assert!(testimonials_rule.is_satisfied(&draft));
    }

    #[test]
    fn test_stats_or_semantics() {
        let registry = SectionRegistry::standard();
        let stats_rule = registry
            .requirements()
            .iter()
            .find(|r| r.field_key == "stats")
            .unwrap();

        let mut draft = EventDraft::empty();
        assert!(!stats_rule.is_satisfied(&draft));

        // A single populated figure is enough
        draft.stats.practice_retention = "92%".to_string();
        assert!(stats_rule.is_satisfied(&draft));
    }

    #[test]
    fn test_blank_benefits_do_not_count() {
        let registry = SectionRegistry::standard();
        let benefits_rule = registry
            .requirements()
            .iter()
            .find(|r| r.field_key == "keyBenefits")
            .unwrap();

        let mut draft = EventDraft::empty();
        draft.key_benefits = vec!["  ".to_string()];
        assert!(!benefits_rule.is_satisfied(&draft));
    }
}
