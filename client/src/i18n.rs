//! UI strings for the two supported subjects.
//!
//! The subject switcher doubles as the language switcher: English pages use
//! [`Translations::EN`] and Svenska pages use [`Translations::SV`].

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

use proto::Subject;

/// Every user-visible label, keyed by field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Translations {
    pub header_subtitle: &'static str,
    pub subject: &'static str,
    pub check_assignment: &'static str,
    pub discussion_and_help: &'static str,
    pub test: &'static str,
    pub audio_support: &'static str,
    pub footer_text: &'static str,

    // Check assignment
    pub assignment_instructions: &'static str,
    pub instructions_placeholder: &'static str,
    pub your_text: &'static str,
    pub text_placeholder: &'static str,
    pub error_message: &'static str,
    pub get_feedback: &'static str,
    pub generating: &'static str,
    pub clear: &'static str,
    pub feedback_will_appear: &'static str,
    pub feedback_will_appear_sub: &'static str,
    pub generating_feedback: &'static str,
    pub generating_feedback_sub: &'static str,
    pub following_instructions: &'static str,
    pub language_and_style: &'static str,

    // Chat pages
    pub chat_welcome: &'static str,
    pub chat_placeholder: &'static str,
    pub send: &'static str,
    pub thinking: &'static str,

    // Audio support
    pub paste_or_upload: &'static str,
    pub your_text_for_tts: &'static str,
    pub text_placeholder_tts: &'static str,
    pub upload_file: &'static str,
    pub load_from_google_drive: &'static str,
    pub google_drive_instructions: &'static str,
    pub close: &'static str,
    pub voice: &'static str,
    pub no_voices_message: &'static str,
    pub no_voices_link_text: &'static str,
    pub speed: &'static str,
    pub play: &'static str,
    pub pause: &'static str,
    pub resume: &'static str,
    pub stop: &'static str,
}

impl Translations {
    pub const EN: Self = Self {
        header_subtitle: "AI-powered tools for learning and feedback.",
        subject: "Subject",
        check_assignment: "Check Assignment",
        discussion_and_help: "Discussion & Help",
        test: "Test",
        audio_support: "Audio Support",
        footer_text: "Powered by AI. Always double-check feedback with your teacher.",

        assignment_instructions: "Assignment Instructions",
        instructions_placeholder: "Paste the teacher's instructions here...",
        your_text: "Your Text",
        text_placeholder: "Paste your completed assignment text here...",
        error_message: "Please provide both assignment instructions and your text.",
        get_feedback: "Get Feedback",
        generating: "Generating...",
        clear: "Clear",
        feedback_will_appear: "Your feedback will appear here",
        feedback_will_appear_sub: "Fill in the instructions and your text, then click \"Get Feedback\" to start.",
        generating_feedback: "Generating Feedback...",
        generating_feedback_sub: "The AI is analyzing your text. This might take a moment.",
        following_instructions: "Following Instructions",
        language_and_style: "Language & Style",

        chat_welcome: "Welcome! How can I help you think through your assignment today?",
        chat_placeholder: "Ask a question or describe what you need help with...",
        send: "Send",
        thinking: "Thinking...",

        paste_or_upload: "Paste text or upload a file to have it read aloud.",
        your_text_for_tts: "Text to read aloud",
        text_placeholder_tts: "Paste or type the text you want to listen to...",
        upload_file: "Upload File",
        load_from_google_drive: "Load from Google Drive",
        google_drive_instructions: "Open the document in Google Drive, download it as a .txt file and upload it here.",
        close: "Close",
        voice: "Voice",
        no_voices_message: "No English voices are installed on this device.",
        no_voices_link_text: "How to install voices",
        speed: "Speed",
        play: "Play",
        pause: "Pause",
        resume: "Resume",
        stop: "Stop",
    };

    pub const SV: Self = Self {
        header_subtitle: "AI-drivna verktyg för lärande och feedback.",
        subject: "Ämne",
        check_assignment: "Granska uppgift",
        discussion_and_help: "Diskussion & hjälp",
        test: "Test",
        audio_support: "Ljudstöd",
        footer_text: "Drivs av AI. Dubbelkolla alltid feedback med din lärare.",

        assignment_instructions: "Uppdragsinstruktioner",
        instructions_placeholder: "Klistra in lärarens instruktioner här...",
        your_text: "Din text",
        text_placeholder: "Klistra in din färdiga uppgiftstext här...",
        error_message: "Vänligen ange både uppdragsinstruktioner och din text.",
        get_feedback: "Få feedback",
        generating: "Genererar...",
        clear: "Rensa",
        feedback_will_appear: "Din feedback kommer att visas här",
        feedback_will_appear_sub: "Fyll i instruktionerna och din text, klicka sedan på \"Få feedback\" för att börja.",
        generating_feedback: "Genererar feedback...",
        generating_feedback_sub: "AI:n analyserar din text. Detta kan ta en liten stund.",
        following_instructions: "Följa instruktioner",
        language_and_style: "Språk & Stil",

        chat_welcome: "Välkommen! Hur kan jag hjälpa dig att tänka igenom din uppgift idag?",
        chat_placeholder: "Ställ en fråga eller beskriv vad du behöver hjälp med...",
        send: "Skicka",
        thinking: "Tänker...",

        paste_or_upload: "Klistra in text eller ladda upp en fil för att få den uppläst.",
        your_text_for_tts: "Text att läsa upp",
        text_placeholder_tts: "Klistra in eller skriv texten du vill lyssna på...",
        upload_file: "Ladda upp fil",
        load_from_google_drive: "Hämta från Google Drive",
        google_drive_instructions: "Öppna dokumentet i Google Drive, ladda ner det som en .txt-fil och ladda upp det här.",
        close: "Stäng",
        voice: "Röst",
        no_voices_message: "Inga svenska röster är installerade på den här enheten.",
        no_voices_link_text: "Så installerar du röster",
        speed: "Hastighet",
        play: "Spela",
        pause: "Pausa",
        resume: "Fortsätt",
        stop: "Stoppa",
    };

    #[must_use]
    pub fn for_subject(subject: Subject) -> &'static Self {
        match subject {
            Subject::English => &Self::EN,
            Subject::Swedish => &Self::SV,
        }
    }
}
