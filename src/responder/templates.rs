//! Reply fragments, fixed addenda, and coping strategies.
//!
//! Each category owns one [`FragmentPool`]. A reply is one fragment from
//! every class, in the order opener → validation → follow-up → support.

use crate::emotion::Category;

/// Interchangeable fragments for one category.
#[derive(Debug)]
pub struct FragmentPool {
    pub opener: &'static [&'static str],
    pub validation: &'static [&'static str],
    pub follow_up: &'static [&'static str],
    pub support: &'static [&'static str],
}

impl FragmentPool {
    /// Fragment classes in assembly order.
    pub fn classes(&self) -> [&'static [&'static str]; 4] {
        [self.opener, self.validation, self.follow_up, self.support]
    }

    /// Number of distinct replies this pool can assemble.
    pub fn combinations(&self) -> usize {
        self.classes().iter().map(|c| c.len()).product()
    }
}

/// Crisis resources appended at high cumulative risk. Never varies.
pub const CRISIS_RESOURCES: &str = concat!(
    "\u{26a0}\u{fe0f} I'm genuinely concerned about you. ",
    "Please consider reaching out for support right now:\n",
    "\u{2022} National Suicide Prevention Lifeline: call or text 988 (24/7)\n",
    "\u{2022} Crisis Text Line: text HOME to 741741\n",
    "\u{2022} Emergency Services: 911",
);

/// One of these follows [`CRISIS_RESOURCES`].
pub const CRISIS_CLOSINGS: &[&str] = &[
    "You deserve help, and these resources are here for you anytime.",
    "Reaching out is a sign of strength, not weakness. You don't have to carry this alone.",
    "Your life matters. Please let someone in on what you're going through tonight.",
];

/// Softer suggestion at medium cumulative risk.
pub const PROFESSIONAL_HELP: &str = concat!(
    "\u{1f499} If you're struggling, please consider talking to a mental health professional. ",
    "They can offer support tailored to what you're going through.",
);

/// Acknowledgment added when the same emotion keeps coming back.
pub fn pattern_addendum(category: Category) -> Option<&'static str> {
    match category {
        Category::Sadness => Some(
            "I've noticed you've been feeling down for a while. Have you considered talking to someone you trust about this?",
        ),
        Category::Anxiety => Some(
            "I notice anxiety has been coming up often. Would it help to explore some coping strategies together?",
        ),
        Category::Anger => Some(
            "It seems like a lot of frustration has been building up lately. It might help to look at what keeps setting it off.",
        ),
        Category::SevereDistress => Some(
            "You've been carrying a lot of pain across our conversation, and I don't want you to face it on your own.",
        ),
        Category::Joy => Some(
            "It's lovely to see you in good spirits so consistently. Whatever you're doing, it seems to be working.",
        ),
        Category::Neutral | Category::Other => None,
    }
}

/// Fragment pool for `category`. `Other` shares the neutral pool.
pub fn pool_for(category: Category) -> &'static FragmentPool {
    match category {
        Category::SevereDistress => &SEVERE_DISTRESS,
        Category::Sadness => &SADNESS,
        Category::Anxiety => &ANXIETY,
        Category::Anger => &ANGER,
        Category::Joy => &JOY,
        Category::Neutral | Category::Other => &NEUTRAL,
    }
}

/// Practical suggestions for the categories that have them.
pub fn coping_strategies(category: Category) -> &'static [&'static str] {
    match category {
        Category::Sadness => &[
            "Practice self-compassion: talk to yourself like you would to a good friend",
            "Engage in small activities you enjoy, even if you don't feel like it",
            "Reach out to someone you trust",
            "Write down your thoughts in a journal",
            "Take a short walk outside if possible",
        ],
        Category::Anxiety => &[
            "Try the 5-4-3-2-1 grounding technique (5 things you see, 4 you hear, and so on)",
            "Practice slow, deep breathing",
            "Write down your worries to get them out of your head",
            "Focus on what you can control right now",
            "Try progressive muscle relaxation",
        ],
        Category::Anger => &[
            "Step away from the situation for a few minutes if you can",
            "Use physical exercise to release tension",
            "Express the feeling through writing or art",
            "Count to ten before responding",
            "Look for the root cause underneath the anger",
        ],
        _ => &[],
    }
}

static SEVERE_DISTRESS: FragmentPool = FragmentPool {
    opener: &[
        "I hear that you're going through an incredibly difficult time.",
        "What you're describing sounds overwhelming, and I'm genuinely concerned.",
        "Thank you for trusting me with something this heavy.",
        "I'm really glad you told me how bad things feel right now.",
    ],
    validation: &[
        "Your feelings are valid, and you don't have to face this alone.",
        "Your life matters, even when it doesn't feel that way.",
        "Pain this deep can make everything look hopeless, but feelings can change.",
        "You deserve support and care, especially right now.",
    ],
    follow_up: &[
        "Are you safe at the moment?",
        "Is there someone nearby you could be with tonight?",
        "Can you tell me a little more about what brought this on?",
        "How long have you been feeling this way?",
    ],
    support: &[
        "I'm here and I'm listening.",
        "We can take this one moment at a time.",
        "You don't need to have the words for everything. Just share what you can.",
        "Staying with me and talking is a good step.",
    ],
};

static SADNESS: FragmentPool = FragmentPool {
    opener: &[
        "I'm sorry you're feeling this way.",
        "It sounds like you're going through a tough time.",
        "That sounds really heavy to carry.",
        "I can hear how low you're feeling.",
    ],
    validation: &[
        "It's okay to feel sad; your emotions are completely valid.",
        "It's okay not to be okay sometimes.",
        "Sadness is a natural human emotion, not a weakness.",
        "Feelings like these won't last forever, even if they feel permanent right now.",
    ],
    follow_up: &[
        "Do you want to tell me what's been weighing on you?",
        "When did you start feeling like this?",
        "Is there something in particular that set this off?",
        "What has today been like for you?",
    ],
    support: &[
        "Be gentle with yourself during this difficult time.",
        "Take things one moment at a time.",
        "Remember, you are not alone in this.",
        "I'm here with you for as long as you want to talk.",
    ],
};

static ANXIETY: FragmentPool = FragmentPool {
    opener: &[
        "It sounds like you're feeling anxious.",
        "I understand you're worried.",
        "That sounds like a lot of pressure.",
        "I can tell your mind is racing right now.",
    ],
    validation: &[
        "Anxiety can feel overwhelming, but you're not alone in this.",
        "Your anxiety is valid, and it makes sense given what you're facing.",
        "Worry is often a sign that something matters to you.",
        "It's completely understandable to feel on edge.",
    ],
    follow_up: &[
        "Would it help to talk about what's worrying you most?",
        "What part of this feels the most out of your control?",
        "Is this worry about something coming up soon?",
        "What usually helps you when your thoughts start spiralling?",
    ],
    support: &[
        "Take a deep breath with me: in for 4, hold for 4, out for 4.",
        "Sometimes it helps to focus on just the next small step.",
        "Let's take things one step at a time.",
        "Try to focus on what you can control right now.",
    ],
};

static ANGER: FragmentPool = FragmentPool {
    opener: &[
        "I can sense your frustration.",
        "It sounds like something has really upset you.",
        "That sounds genuinely infuriating.",
        "I can hear how fed up you are.",
    ],
    validation: &[
        "It's okay to feel angry; it's a valid emotion.",
        "Your anger is understandable.",
        "Anger often tells us that something important to us has been affected.",
        "Anyone in your position might feel the same way.",
    ],
    follow_up: &[
        "Would it help to talk about what happened?",
        "What about this bothers you the most?",
        "Has this been building up for a while?",
        "Who or what is at the centre of this?",
    ],
    support: &[
        "I'm here to listen without judgement.",
        "Let's work through this together.",
        "Getting it off your chest can take some of the heat out of it.",
        "You can vent here as much as you need.",
    ],
};

static JOY: FragmentPool = FragmentPool {
    opener: &[
        "That's wonderful to hear!",
        "I love hearing this!",
        "That's amazing!",
        "What great news!",
    ],
    validation: &[
        "I'm so glad you're feeling positive.",
        "It's great that you're in a good place right now.",
        "Your happiness is contagious.",
        "Moments like this are worth savouring.",
    ],
    follow_up: &[
        "What's making you feel so good today?",
        "What happened?",
        "Is there someone you're sharing this with?",
        "How are you planning to enjoy it?",
    ],
    support: &[
        "Celebrating the good moments with you!",
        "Hold on to this feeling.",
        "You deserve days like this.",
        "Thanks for sharing the good stuff with me too.",
    ],
};

static NEUTRAL: FragmentPool = FragmentPool {
    opener: &[
        "Thank you for sharing.",
        "I'm listening.",
        "I appreciate you opening up.",
        "Thanks for checking in.",
    ],
    validation: &[
        "Whatever you're feeling right now is okay.",
        "There's no right or wrong way to feel.",
        "It's good to take a moment to notice how you're doing.",
        "Not every day has to be a big one.",
    ],
    follow_up: &[
        "How else are you feeling?",
        "What would you like to talk about?",
        "Tell me more about what's going on.",
        "Is anything on your mind today?",
    ],
    support: &[
        "I'm here for you.",
        "Feel free to share whatever is on your mind.",
        "Take your time.",
        "I'm happy to just chat, too.",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pool_has_every_class() {
        for category in Category::ALL {
            let pool = pool_for(category);
            for class in pool.classes() {
                assert!(!class.is_empty(), "{category} has an empty fragment class");
            }
            assert!(pool.combinations() >= 64);
        }
    }

    #[test]
    fn other_uses_neutral_pool() {
        assert!(std::ptr::eq(pool_for(Category::Other), pool_for(Category::Neutral)));
    }

    #[test]
    fn fragments_never_contain_addenda_text() {
        for category in Category::ALL {
            for class in pool_for(category).classes() {
                for fragment in class {
                    assert!(!fragment.contains("988"));
                    assert!(!fragment.contains("mental health professional"));
                }
            }
        }
    }

    #[test]
    fn crisis_block_lists_all_resources() {
        assert!(CRISIS_RESOURCES.contains("988"));
        assert!(CRISIS_RESOURCES.contains("741741"));
        assert!(CRISIS_RESOURCES.contains("911"));
    }

    #[test]
    fn coping_strategies_only_for_hard_emotions() {
        assert_eq!(coping_strategies(Category::Anxiety).len(), 5);
        assert!(coping_strategies(Category::Joy).is_empty());
        assert!(coping_strategies(Category::Other).is_empty());
    }
}
