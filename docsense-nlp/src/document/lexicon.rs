//! Closed-class word lists used by the rule-based annotator.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

pub(crate) static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
        "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
        "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
        "beside", "besides", "between", "beyond", "both", "but", "by", "ca", "can", "cannot",
        "could", "did", "do", "does", "doing", "done", "down", "due", "during", "each", "either",
        "else", "elsewhere", "enough", "even", "ever", "every", "everyone", "everything",
        "everywhere", "except", "few", "for", "former", "formerly", "from", "further", "had",
        "has", "have", "having", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "indeed",
        "into", "is", "it", "its", "itself", "just", "latter", "least", "less", "made", "many",
        "may", "me", "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "much",
        "must", "my", "myself", "namely", "neither", "never", "nevertheless", "next", "no",
        "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
        "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our",
        "ours", "ourselves", "out", "over", "own", "per", "perhaps", "please", "put", "quite",
        "rather", "re", "really", "regarding", "same", "say", "seem", "seemed", "seeming",
        "seems", "several", "she", "should", "since", "so", "some", "somehow", "someone",
        "something", "sometime", "sometimes", "somewhere", "still", "such", "than", "that",
        "the", "their", "theirs", "them", "themselves", "then", "thence", "there", "thereafter",
        "thereby", "therefore", "therein", "thereupon", "these", "they", "this", "those",
        "though", "through", "throughout", "thru", "thus", "to", "together", "too", "toward",
        "towards", "under", "unless", "until", "up", "upon", "us", "used", "using", "various",
        "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
        "whenever", "where", "whereas", "whereby", "wherein", "whereupon", "wherever",
        "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose",
        "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
        "yourself", "yourselves", "n't", "'s", "'re", "'ve", "'ll", "'d", "'m", "wo",
    ]
    .into_iter()
    .collect()
});

pub(crate) static DETERMINERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
        "all", "both", "another", "either", "neither", "such", "whatever", "which", "what",
    ]
    .into_iter()
    .collect()
});

pub(crate) static POSSESSIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["my", "your", "his", "her", "its", "our", "their", "whose"]
        .into_iter()
        .collect()
});

pub(crate) static PRONOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves",
        "mine", "yours", "hers", "ours", "theirs", "who", "whom", "something", "anything",
        "nothing", "everything", "someone", "anyone", "everyone", "nobody", "somebody",
        "everybody", "one", "none",
    ]
    .into_iter()
    .collect()
});

/// Pronouns that open a clause as its subject.
pub(crate) static SUBJECT_PRONOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["i", "you", "he", "she", "it", "we", "they", "who", "this", "that", "there"]
        .into_iter()
        .collect()
});

pub(crate) static ADPOSITIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "over", "under",
        "within", "without", "among", "across", "toward", "towards", "upon", "via", "per",
        "than", "despite", "throughout", "beyond", "behind", "around", "along", "near", "onto",
        "like", "unlike", "including", "regarding", "since", "until", "amid", "beside",
    ]
    .into_iter()
    .collect()
});

pub(crate) static COORDINATORS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ["and", "or", "but", "nor", "yet", "&"].into_iter().collect());

pub(crate) static SUBORDINATORS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "because", "although", "though", "while", "if", "unless", "whether", "whereas", "as",
        "whenever", "wherever",
    ]
    .into_iter()
    .collect()
});

/// Auxiliary verb forms mapped to their lemma.
pub(crate) static AUXILIARIES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        [
            ("be", "be"), ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"),
            ("were", "be"), ("been", "be"), ("being", "be"), ("'m", "be"), ("'re", "be"),
            ("have", "have"), ("has", "have"), ("had", "have"), ("having", "have"),
            ("'ve", "have"), ("do", "do"), ("does", "do"), ("did", "do"), ("can", "can"),
            ("ca", "can"), ("could", "could"), ("will", "will"), ("wo", "will"),
            ("'ll", "will"), ("would", "would"), ("'d", "would"), ("shall", "shall"),
            ("should", "should"), ("may", "may"), ("might", "might"), ("must", "must"),
        ]
        .into_iter()
        .collect()
    });

/// Forms of "be" that can head a passive construction.
pub(crate) static BE_FORMS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["be", "am", "is", "are", "was", "were", "been", "being", "'m", "'re", "get", "got", "gets"]
        .into_iter()
        .collect()
});

/// Linking verbs after which an -ed form reads as an adjective.
pub(crate) static COPULAS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "be", "feel", "seem", "look", "become", "appear", "remain", "sound", "grow", "stay",
        "get",
    ]
    .into_iter()
    .collect()
});

pub(crate) static ADVERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "very", "extremely", "really", "quite", "rather", "somewhat", "slightly", "barely",
        "hardly", "absolutely", "completely", "totally", "incredibly", "also", "too", "just",
        "only", "never", "always", "often", "sometimes", "here", "there", "now", "then",
        "however", "therefore", "thus", "still", "already", "even", "again", "almost", "more",
        "most", "less", "least", "soon", "yet", "so", "well", "moreover", "furthermore",
        "consequently", "nevertheless", "nonetheless", "indeed", "perhaps", "maybe", "ever",
        "once", "today", "tomorrow", "yesterday", "away", "back", "far", "much", "instead",
        "otherwise", "else", "together", "meanwhile", "hence", "not", "when", "where", "why",
        "how", "twice", "thrice", "repeatedly", "frequently", "rarely", "seldom", "usually",
        "occasionally", "afterwards", "anew",
    ]
    .into_iter()
    .collect()
});

pub(crate) static INTERJECTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["oh", "wow", "hey", "ah", "alas", "ouch", "hooray", "yes", "okay", "ok", "oops", "hmm"]
        .into_iter()
        .collect()
});

/// Common base-form verbs used to resolve ambiguous open-class words.
pub(crate) static COMMON_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "make", "go", "get", "take", "see", "know", "think", "come", "give", "find", "use",
        "tell", "ask", "work", "seem", "feel", "try", "leave", "call", "show", "provide",
        "include", "improve", "increase", "reduce", "help", "create", "love", "like", "hate",
        "enjoy", "need", "want", "suggest", "indicate", "analyze", "analyse", "recommend",
        "build", "keep", "let", "begin", "start", "run", "move", "live", "believe", "bring",
        "happen", "write", "sit", "stand", "lose", "pay", "meet", "learn", "change", "lead",
        "understand", "watch", "follow", "stop", "speak", "read", "spend", "grow", "open",
        "walk", "win", "offer", "remember", "consider", "appear", "buy", "wait", "serve", "die",
        "send", "expect", "stay", "fall", "cut", "reach", "kill", "remain", "report", "decide",
        "pull", "explain", "develop", "describe", "examine", "measure", "observe", "support",
        "affect", "produce", "deliver", "exceed", "recommend", "detest", "loathe", "abhor",
        "fear", "dread", "adore", "admire", "thank", "appreciate", "praise", "complain",
        "scatter", "perceive", "inspire", "connect", "predict", "study", "look", "say", "do",
        "become", "mean", "hold", "turn", "play", "put", "set", "hear", "allow", "add",
    ]
    .into_iter()
    .collect()
});

pub(crate) static COMMON_ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "good", "bad", "great", "new", "old", "big", "small", "large", "little", "high", "low",
        "long", "short", "young", "important", "different", "same", "able", "happy", "sad",
        "angry", "mad", "glad", "upset", "afraid", "nervous", "anxious", "excellent", "poor",
        "terrible", "awful", "wonderful", "amazing", "fantastic", "beautiful", "ugly", "nice",
        "fine", "bright", "dark", "clear", "simple", "hard", "easy", "true", "false", "real",
        "full", "empty", "free", "sure", "certain", "whole", "main", "major", "minor", "best",
        "better", "worse", "worst", "blue", "red", "green", "white", "black", "grey", "gray",
        "orange", "purple", "pink", "deep", "warm", "cold", "hot", "sick", "slow", "fast",
        "quick", "strong", "weak", "rich", "vast", "tiny", "pale", "calm", "brilliant", "rude",
        "unacceptable", "horrible", "disappointing", "outstanding", "superb", "lovely",
        "pleasant", "unpleasant", "miserable", "gloomy", "furious", "livid", "irate", "content",
        "recent", "several", "many", "few", "first", "last", "next", "early", "late", "human",
        "social", "public", "local", "national", "general", "specific", "significant",
    ]
    .into_iter()
    .collect()
});

/// Irregular inflections mapped to their lemma.
pub(crate) static IRREGULAR_LEMMAS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        [
            ("went", "go"), ("gone", "go"), ("made", "make"), ("said", "say"), ("got", "get"),
            ("gotten", "get"), ("took", "take"), ("taken", "take"), ("saw", "see"),
            ("seen", "see"), ("knew", "know"), ("known", "know"), ("thought", "think"),
            ("came", "come"), ("gave", "give"), ("given", "give"), ("found", "find"),
            ("told", "tell"), ("felt", "feel"), ("left", "leave"), ("brought", "bring"),
            ("began", "begin"), ("begun", "begin"), ("kept", "keep"), ("held", "hold"),
            ("wrote", "write"), ("written", "write"), ("stood", "stand"), ("heard", "hear"),
            ("meant", "mean"), ("met", "meet"), ("ran", "run"), ("paid", "pay"), ("sat", "sit"),
            ("spoke", "speak"), ("spoken", "speak"), ("led", "lead"), ("grew", "grow"),
            ("grown", "grow"), ("lost", "lose"), ("fell", "fall"), ("fallen", "fall"),
            ("sent", "send"), ("built", "build"), ("understood", "understand"),
            ("drew", "draw"), ("drawn", "draw"), ("broke", "break"), ("broken", "break"),
            ("spent", "spend"), ("rose", "rise"), ("risen", "rise"), ("chose", "choose"),
            ("chosen", "choose"), ("sought", "seek"), ("taught", "teach"), ("bought", "buy"),
            ("caught", "catch"), ("fought", "fight"), ("won", "win"), ("became", "become"),
            ("shown", "show"), ("children", "child"), ("men", "man"), ("women", "woman"),
            ("feet", "foot"), ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"),
            ("criteria", "criterion"), ("phenomena", "phenomenon"), ("analyses", "analysis"),
            ("hypotheses", "hypothesis"), ("theses", "thesis"), ("crises", "crisis"),
            ("n't", "not"), ("ai", "be"),
        ]
        .into_iter()
        .collect()
    });

/// Words ending in "s" that are not plurals.
pub(crate) static INVARIANT_S: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "news", "series", "species", "means", "physics", "mathematics", "economics",
        "statistics", "politics", "ethics", "lens", "always", "perhaps", "towards", "afterwards",
        "this", "his", "its", "yes", "thus", "was", "has", "does", "is", "us", "gas", "bus",
        "plus", "status", "focus", "bonus", "virus", "campus", "census", "canvas", "atlas",
        "chaos", "ethos", "pathos", "bias", "alias", "basis", "analysis", "crisis", "thesis",
        "hypothesis", "emphasis", "synthesis",
    ]
    .into_iter()
    .collect()
});

/// Abbreviations that keep their trailing period.
pub(crate) static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co",
        "corp", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov",
        "dec", "fig", "approx", "dept", "est", "gen", "gov", "mt",
    ]
    .into_iter()
    .collect()
});

pub(crate) static PERSON_TITLES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "mr.", "mrs.", "ms.", "dr.", "prof.", "sir", "madam", "president", "professor",
        "senator", "king", "queen", "saint", "st.",
    ]
    .into_iter()
    .collect()
});

pub(crate) static ORG_SUFFIXES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "inc", "inc.", "corp", "corp.", "ltd", "ltd.", "llc", "co.", "company", "corporation",
        "university", "institute", "agency", "association", "organization", "organisation",
        "foundation", "bank", "group", "council", "committee", "department", "ministry",
        "school", "college", "society", "laboratory", "labs", "commission", "federation",
    ]
    .into_iter()
    .collect()
});

pub(crate) static PLACES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "earth", "america", "europe", "asia", "africa", "australia", "antarctica", "china",
        "india", "japan", "germany", "france", "spain", "italy", "canada", "mexico", "brazil",
        "russia", "england", "britain", "london", "paris", "berlin", "tokyo", "beijing",
        "washington", "california", "texas", "york", "boston", "chicago", "sydney", "ireland",
        "scotland", "wales", "korea", "egypt", "kenya", "nigeria", "argentina", "chile",
        "sweden", "norway", "finland", "denmark", "poland", "ukraine", "turkey", "iran", "iraq",
        "israel", "singapore", "vietnam", "indonesia", "pakistan", "netherlands", "belgium",
        "switzerland", "austria", "portugal", "greece", "rome", "madrid", "moscow", "delhi",
    ]
    .into_iter()
    .collect()
});

pub(crate) static GEO_SUFFIXES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "river", "mountain", "mountains", "lake", "ocean", "sea", "valley", "island",
        "islands", "desert", "forest", "bay", "gulf", "coast", "peninsula", "canyon",
    ]
    .into_iter()
    .collect()
});

pub(crate) static NATIONALITIES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "american", "european", "asian", "african", "chinese", "indian", "japanese", "german",
        "french", "spanish", "italian", "canadian", "mexican", "brazilian", "russian",
        "english", "british", "irish", "scottish", "korean", "christian", "muslim", "jewish",
        "hindu", "buddhist", "christianity", "hinduism", "islam", "buddhism", "romantic",
        "indigenous", "greek", "roman", "egyptian", "dutch", "swedish", "norwegian",
    ]
    .into_iter()
    .collect()
});

pub(crate) static MONTHS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december", "jan.", "feb.", "mar.", "apr.", "jun.", "jul.",
        "aug.", "sep.", "sept.", "oct.", "nov.", "dec.",
    ]
    .into_iter()
    .collect()
});

pub(crate) static WEEKDAYS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
        "today", "yesterday", "tomorrow",
    ]
    .into_iter()
    .collect()
});

pub(crate) static CURRENCY_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "dollar", "dollars", "euro", "euros", "pound", "pounds", "yen", "yuan", "cents",
        "million", "billion", "trillion",
    ]
    .into_iter()
    .collect()
});

pub(crate) static NUMBER_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty",
        "ninety", "hundred", "thousand", "million", "billion", "trillion", "dozen",
    ]
    .into_iter()
    .collect()
});

/// Past participles that usually describe a state ("I am excited").
pub(crate) static ADJECTIVAL_PARTICIPLES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| {
        [
            "excited", "pleased", "delighted", "elated", "overjoyed", "thrilled", "surprised",
            "amazed", "shocked", "astonished", "stunned", "bewildered", "startled",
            "astounded", "flabbergasted", "dumbfounded", "worried", "scared", "terrified",
            "alarmed", "horrified", "intimidated", "petrified", "annoyed", "irritated",
            "frustrated", "outraged", "enraged", "incensed", "depressed", "dejected",
            "heartbroken", "downcast", "disgusted", "revolted", "repulsed", "nauseated",
            "appalled", "repelled", "sickened", "offended", "interested", "bored", "tired",
            "confused", "disappointed", "satisfied", "impressed", "relieved", "embarrassed",
            "ashamed", "concerned", "detailed", "complicated", "sophisticated", "advanced",
            "limited", "qualified", "experienced", "talented", "skilled", "unexpected",
            "dedicated", "related", "based", "unbounded", "unobscured", "muted",
        ]
        .into_iter()
        .collect()
    });

/// Words ending in -ing that are nouns.
pub(crate) static ING_NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "thing", "king", "ring", "spring", "string", "morning", "evening", "ceiling",
        "wing", "sibling", "building", "meaning", "feeling", "finding", "findings", "setting",
        "ending", "beginning", "painting", "clothing", "housing", "funding", "training",
        "warning", "understanding", "wedding", "offspring", "pudding", "duckling", "viking",
        "sing", "bring", "sting", "swing", "thinking", "learning", "reading", "writing",
    ]
    .into_iter()
    .collect()
});

pub(crate) static LY_NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "family", "supply", "reply", "ally", "rally", "assembly", "anomaly", "monopoly",
        "july", "italy", "butterfly", "belly", "jelly", "lily", "bully", "fly",
    ]
    .into_iter()
    .collect()
});

pub(crate) static LY_ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "early", "likely", "unlikely", "friendly", "lovely", "lonely", "ugly", "holy", "silly",
        "daily", "weekly", "monthly", "yearly", "costly", "elderly", "only", "lively",
        "orderly", "timely", "deadly", "curly", "hilly", "chilly", "smelly", "scholarly",
    ]
    .into_iter()
    .collect()
});

/// Words ending in -al or -ic that are nouns.
pub(crate) static AL_IC_NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "animal", "signal", "capital", "journal", "festival", "proposal", "approval",
        "arrival", "material", "individual", "potential", "professional", "interval",
        "hospital", "metal", "crystal", "portal", "rental", "survival", "removal", "ritual",
        "music", "logic", "topic", "traffic", "panic", "clinic", "fabric", "republic",
        "rhetoric", "arithmetic", "critic", "mechanic", "graphic", "plastic", "mosaic",
        "epidemic", "pandemic", "chemical", "mineral", "general", "original", "total",
        "terminal", "manual", "deal", "goal", "meal", "seal", "ideal", "appeal", "reveal",
    ]
    .into_iter()
    .collect()
});

/// Stems that do not take a silent "e" when an inflection is removed.
pub(crate) static NO_SILENT_E: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "treat", "eat", "beat", "heat", "seat", "repeat", "defeat", "threat", "float", "bloat",
        "boat", "coat", "focus", "bias", "canvas", "output", "combat", "format", "chat",
        "monitor", "honor", "color", "favor", "labor", "author", "sponsor", "tailor", "mentor",
        "flavor", "harbor", "censor", "factor", "doctor", "motor", "solicit", "elicit",
        "deposit", "gossip", "develop", "wait", "visit",
    ]
    .into_iter()
    .collect()
});
