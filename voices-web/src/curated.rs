//! Curated student stories shown on the public pages
//!
//! The home marquee and the story listing page each carry their own fixed
//! list. Only the listing includes video stories.

use serde_json::{json, Value};

/// External petition the campaign pages point to
pub const PETITION_URL: &str = "https://www.change.org/p/stop-the-bill-for-med-schooool";

/// The fixed story list fed to the home page marquee
pub fn curated_stories() -> Vec<Value> {
    vec![
        json!({
            "id": "story-1",
            "quote": "Federal loans aren't just funding my education; they're investing in the health of communities that desperately need doctors like me.",
            "name": "Dr. Aisha Khan",
            "affiliation": "Rural Health Advocate, Class of '26",
        }),
        json!({
            "id": "story-2",
            "quote": "Coming from a low-income family, medical school felt like an impossible dream. This bill would make it so for countless others.",
            "name": "Marcus Chen",
            "affiliation": "Aspiring Pediatrician, M1 Student",
        }),
        json!({
            "id": "story-3",
            "quote": "Diversity in medicine is crucial for equitable care. Removing financial aid options disproportionately silences voices we need to hear.",
            "name": "Sofia Ramirez",
            "affiliation": "Public Health Researcher, MD-PhD Candidate",
        }),
        json!({
            "id": "story-4",
            "quote": "The path to becoming a physician is already a marathon of dedication and sacrifice. Let's not add an insurmountable financial hurdle.",
            "name": "Ben Carter",
            "affiliation": "Emergency Medicine Resident",
        }),
        json!({
            "id": "story-5",
            "quote": "Every signature on this petition is a vote for a future where talent and passion, not wealth, define who can heal.",
            "name": "Olivia Park",
            "affiliation": "Future Surgeon, Student Activist",
        }),
        json!({
            "id": "story-6",
            "quote": "This isn't just about student debt; it's about the future of patient care and who gets to provide it. We must act.",
            "name": "Dr. Emily Sato",
            "affiliation": "Internal Medicine Attending",
        }),
    ]
}

/// Featured stories for the story listing page
pub fn listing_stories() -> Vec<Value> {
    vec![
        json!({
            "id": "alex-m",
            "title": "If This Passes, I Can't Become a Doctor",
            "quote": "I've dreamed of becoming a doctor since I was twelve. I come from a working-class family in Queens; my mom's a school bus driver, my dad's a retired sanitation worker. There's no way I could even think about medical school without federal loans. I've already taken out $180,000 just to get through undergrad and my post-bacc. This bill would slam the door shut for people like me, not because we lack the grades or determination, but because we weren't born rich.",
            "name": "Alex M.",
            "affiliation": "SUNY Downstate",
            "submissionType": "text",
        }),
        json!({
            "id": "maya-video",
            "title": "My Journey from Rural America to Medical School",
            "quote": "In this video, I share my story of growing up in rural Michigan and how federal loans made it possible for me to pursue my dream of becoming a doctor to serve underserved communities.",
            "name": "Maya Chen",
            "affiliation": "University of Michigan Medical School",
            "submissionType": "video",
            "videoUrl": "https://www.youtube.com/embed/dQw4w9WgXcQ",
        }),
        json!({
            "id": "anita-k",
            "title": "I'm the First in My Family... and Maybe the Last",
            "quote": "My parents immigrated from Nigeria and have worked every day of their lives to give me this chance. I'm the first in my entire family to make it this far, to even dream of becoming a physician. If this passes, there's no backup. No rich uncle. No savings account. Just a dead-end.",
            "name": "Anita K.",
            "affiliation": "Howard University",
            "submissionType": "text",
        }),
        json!({
            "id": "james-video",
            "title": "Why I Started Medical School at 32",
            "quote": "Watch my story about taking an unconventional path to medicine and why federal loans were crucial for someone like me who couldn't afford to wait for family wealth.",
            "name": "James Thompson",
            "affiliation": "Columbia University Vagelos College of Physicians and Surgeons",
            "submissionType": "video",
            "videoUrl": "https://www.youtube.com/embed/dQw4w9WgXcQ",
        }),
        json!({
            "id": "luis-r",
            "title": "We Need More Doctors, Not Fewer",
            "quote": "I'm Latino, gay, and from a small town where the nearest hospital is 45 minutes away. I want to go back to my community and provide care where it's desperately needed. Take away financial aid, and you're telling whole populations: you're not wanted in medicine.",
            "name": "Luis R.",
            "affiliation": "University of California, San Francisco (UCSF)",
            "submissionType": "text",
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marquee::Marquee;

    #[test]
    fn test_all_curated_stories_display() {
        let stories = curated_stories();
        let marquee = Marquee::build(&stories);

        assert_eq!(marquee.valid().len(), 6);
        assert_eq!(marquee.sequence().len(), 12);
        assert!(marquee.valid().iter().all(|card| !card.is_video()));
    }

    #[test]
    fn test_listing_stories_include_videos() {
        let stories = listing_stories();
        let marquee = Marquee::build(&stories);

        assert_eq!(marquee.valid().len(), 5);
        let videos: Vec<&str> = marquee
            .valid()
            .iter()
            .filter(|card| card.is_video())
            .map(|card| card.id.as_str())
            .collect();
        assert_eq!(videos, vec!["maya-video", "james-video"]);
    }
}
