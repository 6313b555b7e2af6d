//! Public page composition: which content blocks each page shows and the
//! placeholder text used until an admin has written them.

use futures_util::future::join_all;

use crate::client::ServiceClient;
use crate::models::ContentBlock;

/// What a page shows when its content block does not exist.
#[derive(Debug, Clone, Copy)]
pub enum Fallback {
    /// The section is omitted.
    Hidden,
    Text {
        title: &'static str,
        content: &'static str,
    },
    Steps {
        title: &'static str,
        steps: &'static [(&'static str, &'static str)],
    },
}

#[derive(Debug, Clone, Copy)]
pub struct ContentSlot {
    pub key: &'static str,
    pub fallback: Fallback,
}

/// A section ready to render.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResolvedBlock {
    pub key: String,
    pub title: String,
    pub content: String,
    pub steps: Vec<(String, String)>,
    /// False when the text is placeholder copy.
    pub stored: bool,
}

/// The home hero. Always renders, and blank stored fields fall back one at a
/// time.
#[derive(Debug, Clone, Copy)]
pub struct HeroSlot {
    pub key: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

/// A page made of content-block sections under a fixed header.
#[derive(Debug, Clone, Copy)]
pub struct BlockPage {
    pub path: &'static str,
    pub heading: &'static str,
    pub intro: &'static str,
    pub slots: &'static [ContentSlot],
}

pub const NOTICE_EXCERPT_CHARS: usize = 200;
pub const ADMIN_PREVIEW_CHARS: usize = 60;
pub const INQUIRY_PREVIEW_CHARS: usize = 50;
pub const STAFF_BIO_PREVIEW_CHARS: usize = 50;

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/about", "About"),
    ("/admissions", "Admissions"),
    ("/academics", "Academics"),
    ("/staff", "Staff"),
    ("/notices", "News & Notices"),
    ("/gallery", "Gallery"),
    ("/contact", "Contact"),
    ("/admin", "Admin"),
];

pub const HOME_WELCOME: HeroSlot = HeroSlot {
    key: "home-welcome",
    title: "Welcome to Government School",
    content: "Empowering students with knowledge, values, and skills for a brighter future. \
              Join us in our mission to provide quality education for all.",
};

pub const HOME_MISSION: ContentSlot = ContentSlot {
    key: "home-mission",
    fallback: Fallback::Hidden,
};

pub const CONTACT_DETAILS: ContentSlot = ContentSlot {
    key: "contact-details",
    fallback: Fallback::Text {
        title: "Contact Information",
        content: "Address\n123 Education Street\nCity, State 12345\n\n\
                  Phone\n(555) 123-4567\n\n\
                  Email\ninfo@govschool.edu\n\n\
                  Office Hours\nMonday - Friday: 8:00 AM - 4:00 PM\nSaturday: 9:00 AM - 1:00 PM",
    },
};

pub const ABOUT: BlockPage = BlockPage {
    path: "/about",
    heading: "About Our School",
    intro: "Learn about our history, vision, and commitment to excellence in education.",
    slots: &[
        ContentSlot {
            key: "about-history",
            fallback: Fallback::Text {
                title: "Our History",
                content: "Government School has been serving the community for decades, providing \
                          quality education to generations of students. Our institution stands as a \
                          pillar of academic excellence and character development.",
            },
        },
        ContentSlot {
            key: "about-vision",
            fallback: Fallback::Text {
                title: "Our Vision",
                content: "To be a leading educational institution that nurtures well-rounded \
                          individuals equipped with knowledge, skills, and values to contribute \
                          meaningfully to society.",
            },
        },
        ContentSlot {
            key: "about-values",
            fallback: Fallback::Text {
                title: "Our Values",
                content: "Excellence \u{2022} Integrity \u{2022} Respect \u{2022} Innovation \u{2022} Community\n\n\
                          We believe in fostering an environment where every student can thrive \
                          academically, socially, and emotionally.",
            },
        },
    ],
};

pub const ADMISSIONS: BlockPage = BlockPage {
    path: "/admissions",
    heading: "Admissions",
    intro: "Join our community of learners. Learn about our admission process and requirements.",
    slots: &[
        ContentSlot {
            key: "admissions-process",
            fallback: Fallback::Steps {
                title: "Admission Process",
                steps: &[
                    (
                        "Step 1: Application Submission",
                        "Complete and submit the admission application form with all required documents.",
                    ),
                    (
                        "Step 2: Document Verification",
                        "Our admissions team will review and verify all submitted documents.",
                    ),
                    (
                        "Step 3: Entrance Assessment",
                        "Students may be required to take an entrance assessment based on grade level.",
                    ),
                    (
                        "Step 4: Admission Decision",
                        "Receive admission decision and complete enrollment formalities.",
                    ),
                ],
            },
        },
        ContentSlot {
            key: "admissions-requirements",
            fallback: Fallback::Text {
                title: "Required Documents",
                content: "\u{2022} Birth Certificate\n\u{2022} Previous School Records\n\
                          \u{2022} Proof of Residence\n\u{2022} Passport-size Photographs\n\
                          \u{2022} Medical Records\n\u{2022} Parent/Guardian ID Proof",
            },
        },
        ContentSlot {
            key: "admissions-dates",
            fallback: Fallback::Text {
                title: "Important Dates",
                content: "Admission applications are accepted throughout the year. Please contact \
                          our admissions office for specific deadlines and available seats for each \
                          grade level.",
            },
        },
    ],
};

pub const ACADEMICS: BlockPage = BlockPage {
    path: "/academics",
    heading: "Academics",
    intro: "Comprehensive curriculum designed to foster academic excellence and holistic development.",
    slots: &[
        ContentSlot {
            key: "academics-curriculum",
            fallback: Fallback::Text {
                title: "Our Curriculum",
                content: "Our curriculum follows the national education framework, providing a \
                          balanced approach to academic learning. We offer comprehensive programs \
                          from primary through secondary education, emphasizing core subjects \
                          including Mathematics, Science, Languages, Social Studies, and Arts.",
            },
        },
        ContentSlot {
            key: "academics-programs",
            fallback: Fallback::Text {
                title: "Academic Programs",
                content: "Primary Education (Grades 1-5)\nMiddle School (Grades 6-8)\n\
                          Secondary Education (Grades 9-10)\nSenior Secondary (Grades 11-12)\n\n\
                          We also offer specialized programs in Science, Commerce, and Humanities \
                          streams for senior secondary students.",
            },
        },
        ContentSlot {
            key: "academics-facilities",
            fallback: Fallback::Text {
                title: "Facilities & Resources",
                content: "\u{2022} Well-equipped Science Laboratories\n\
                          \u{2022} Computer Labs with modern technology\n\
                          \u{2022} Comprehensive Library\n\u{2022} Sports Facilities\n\
                          \u{2022} Art and Music Rooms\n\u{2022} Smart Classrooms",
            },
        },
    ],
};

impl ContentSlot {
    /// Combines a fetched block with this slot's fallback. A stored block is
    /// shown as saved.
    pub fn resolve(&self, stored: Option<ContentBlock>) -> Option<ResolvedBlock> {
        let key = self.key.to_string();
        match (stored, self.fallback) {
            (Some(block), _) => Some(ResolvedBlock {
                key,
                title: block.title,
                content: block.content,
                steps: Vec::new(),
                stored: true,
            }),
            (None, Fallback::Hidden) => None,
            (None, Fallback::Text { title, content }) => Some(ResolvedBlock {
                key,
                title: title.to_string(),
                content: content.to_string(),
                steps: Vec::new(),
                stored: false,
            }),
            (None, Fallback::Steps { title, steps }) => Some(ResolvedBlock {
                key,
                title: title.to_string(),
                content: String::new(),
                steps: steps
                    .iter()
                    .map(|(h, d)| (h.to_string(), d.to_string()))
                    .collect(),
                stored: false,
            }),
        }
    }
}

impl HeroSlot {
    pub fn resolve(&self, stored: Option<ContentBlock>) -> ResolvedBlock {
        let (title, content, stored) = match stored {
            Some(block) => (
                non_blank_or(block.title, self.title),
                non_blank_or(block.content, self.content),
                true,
            ),
            None => (self.title.to_string(), self.content.to_string(), false),
        };

        ResolvedBlock {
            key: self.key.to_string(),
            title,
            content,
            steps: Vec::new(),
            stored,
        }
    }
}

fn non_blank_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Fetches every slot concurrently. A failed read renders the fallback.
pub async fn load_slots(client: &ServiceClient, slots: &[ContentSlot]) -> Vec<ResolvedBlock> {
    let reads = slots.iter().map(|slot| client.content_block(slot.key));
    let results = join_all(reads).await;

    slots
        .iter()
        .zip(results)
        .filter_map(|(slot, result)| {
            let stored = result.unwrap_or_else(|e| {
                log::warn!("Falling back for content block '{}': {}", slot.key, e);
                None
            });
            slot.resolve(stored)
        })
        .collect()
}

pub async fn load_hero(client: &ServiceClient, slot: HeroSlot) -> ResolvedBlock {
    let stored = client.content_block(slot.key).await.unwrap_or_else(|e| {
        log::warn!("Falling back for content block '{}': {}", slot.key, e);
        None
    });
    slot.resolve(stored)
}

pub async fn load_slot(client: &ServiceClient, slot: ContentSlot) -> Option<ResolvedBlock> {
    load_slots(client, &[slot]).await.pop()
}

/// First `max_chars` characters followed by "..." when the text is longer.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Whether a nav link should be highlighted for `current_path`.
pub fn is_active(current_path: &str, href: &str) -> bool {
    if href == "/" {
        current_path == "/"
    } else {
        current_path == href
            || current_path
                .strip_prefix(href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}
