use log::debug;
use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};

/// Topics a day's lesson can be drawn from
pub const TOPICS: [&str; 5] = [
    "Berätta om en aktuell tekniknyhet eller trend inom IT-branschen som en utvecklare bör känna till. Ge en pedagogisk genomgång med praktiska exempel.",
    "Välj ett viktigt koncept inom datavetenskap, nätverk, säkerhet eller mjukvaruutveckling och förklara det på ett sätt som hjälper en utvecklare att lära sig något nytt.",
    "Hitta en intressant teknisk artikel eller upptäckt från senaste tiden och sammanfatta huvudpunkterna på ett pedagogiskt sätt för utvecklare.",
    "Förklara ett avancerat programmeringskoncept eller arkitekturmönster som är relevant för moderna utvecklare, med praktiska exempel.",
    "Berätta om en ny teknologi, ramverk eller verktyg som utvecklare bör känna till, och varför det är viktigt.",
];

/// Headings the model is asked to structure its answer with
pub const REQUIRED_HEADINGS: [&str; 5] = [
    "**Ämne:**",
    "**Huvudpunkter:**",
    "**Detaljerad förklaring:**",
    "**Praktiska tips:**",
    "**Länkar för vidare läsning:**",
];

/// Wraps a topic in the fixed instructions (language, headings, length)
pub fn render_prompt(topic: &str) -> String {
    format!(
        "Du är en erfaren IT-pedagog som hjälper utvecklare att lära sig nya saker.

{topic}

Svara på svenska och strukturera ditt svar så här:

{} [Kort beskrivning av vad du kommer att förklara]

{}
- Punkt 1
- Punkt 2
- Punkt 3

{}
[Pedagogisk förklaring med exempel]

{}
[Konkreta råd för utvecklare]

{}
[Relevanta länkar om tillgängliga]

Gör svaret informativt men lättläst, ungefär 300-500 ord.",
        REQUIRED_HEADINGS[0],
        REQUIRED_HEADINGS[1],
        REQUIRED_HEADINGS[2],
        REQUIRED_HEADINGS[3],
        REQUIRED_HEADINGS[4],
    )
}

/// Picks one of [`TOPICS`] with the supplied random source
pub struct PromptBuilder<R> {
    rng: R,
}

impl PromptBuilder<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for PromptBuilder<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PromptBuilder<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn build(&mut self) -> String {
        let topic = TOPICS.choose(&mut self.rng).copied().unwrap_or(TOPICS[0]);
        debug!("Selected topic: {topic:?}");
        render_prompt(topic)
    }
}
