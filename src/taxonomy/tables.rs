//! Built-in vocabulary. Keys are site labels in any casing; they are run
//! through the normalizer when the tables are built.

pub const CANONICAL_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Amateur",
    "Animation",
    "Behind the Scenes",
    "Comedy",
    "Compilation",
    "Documentary",
    "Drama",
    "Fantasy",
    "Historical",
    "Horror",
    "Interview",
    "Military",
    "Music",
    "Mystery",
    "Outdoors",
    "Parody",
    "Romance",
    "Science Fiction",
    "Sports",
    "Thriller",
    "Uniforms",
    "Western",
];

pub const CANONICAL_COUNTRIES: &[&str] = &[
    "Argentina",
    "Australia",
    "Brazil",
    "Canada",
    "Colombia",
    "Czech Republic",
    "France",
    "Germany",
    "Hungary",
    "Italy",
    "Japan",
    "Mexico",
    "Netherlands",
    "Russia",
    "Spain",
    "Thailand",
    "United Kingdom",
    "United States",
];

pub const GENRE_LABELS: &[(&str, &str)] = &[
    ("action", "Action"),
    ("adventure", "Adventure"),
    ("amateur", "Amateur"),
    ("homemade", "Amateur"),
    ("animated", "Animation"),
    ("animation", "Animation"),
    ("cartoon", "Animation"),
    ("behind the scenes", "Behind the Scenes"),
    ("bts", "Behind the Scenes"),
    ("making of", "Behind the Scenes"),
    ("comedy", "Comedy"),
    ("comedies", "Comedy"),
    ("funny", "Comedy"),
    ("best of", "Compilation"),
    ("compilation", "Compilation"),
    ("compilations", "Compilation"),
    ("documentary", "Documentary"),
    ("documentaries", "Documentary"),
    ("drama", "Drama"),
    ("dramatic", "Drama"),
    ("fantasy", "Fantasy"),
    ("historical", "Historical"),
    ("period piece", "Historical"),
    ("vintage", "Historical"),
    ("horror", "Horror"),
    ("scary", "Horror"),
    ("interview", "Interview"),
    ("interviews", "Interview"),
    ("army", "Military"),
    ("military", "Military"),
    ("navy", "Military"),
    ("soldiers", "Military"),
    ("music", "Music"),
    ("musical", "Music"),
    ("music video", "Music"),
    ("mystery", "Mystery"),
    ("whodunit", "Mystery"),
    ("open air", "Outdoors"),
    ("outdoor", "Outdoors"),
    ("outdoors", "Outdoors"),
    ("parody", "Parody"),
    ("spoof", "Parody"),
    ("love story", "Romance"),
    ("romance", "Romance"),
    ("romantic", "Romance"),
    ("sci-fi", "Science Fiction"),
    ("science fiction", "Science Fiction"),
    ("scifi", "Science Fiction"),
    ("athletes", "Sports"),
    ("jocks", "Sports"),
    ("sport", "Sports"),
    ("sports", "Sports"),
    ("suspense", "Thriller"),
    ("thriller", "Thriller"),
    ("cops", "Uniforms"),
    ("uniform", "Uniforms"),
    ("uniforms", "Uniforms"),
    ("cowboy", "Western"),
    ("cowboys", "Western"),
    ("western", "Western"),
];

pub const COUNTRY_LABELS: &[(&str, &str)] = &[
    ("argentina", "Argentina"),
    ("argentinian", "Argentina"),
    ("australia", "Australia"),
    ("australian", "Australia"),
    ("brasil", "Brazil"),
    ("brazil", "Brazil"),
    ("brazilian", "Brazil"),
    ("canada", "Canada"),
    ("canadian", "Canada"),
    ("colombia", "Colombia"),
    ("colombian", "Colombia"),
    ("czech", "Czech Republic"),
    ("czech republic", "Czech Republic"),
    ("czechia", "Czech Republic"),
    ("france", "France"),
    ("french", "France"),
    ("german", "Germany"),
    ("germany", "Germany"),
    ("deutschland", "Germany"),
    ("hungarian", "Hungary"),
    ("hungary", "Hungary"),
    ("italia", "Italy"),
    ("italian", "Italy"),
    ("italy", "Italy"),
    ("japan", "Japan"),
    ("japanese", "Japan"),
    ("mexican", "Mexico"),
    ("mexico", "Mexico"),
    ("dutch", "Netherlands"),
    ("holland", "Netherlands"),
    ("netherlands", "Netherlands"),
    ("russia", "Russia"),
    ("russian", "Russia"),
    ("españa", "Spain"),
    ("spain", "Spain"),
    ("spanish", "Spain"),
    ("thai", "Thailand"),
    ("thailand", "Thailand"),
    ("britain", "United Kingdom"),
    ("british", "United Kingdom"),
    ("england", "United Kingdom"),
    ("english", "United Kingdom"),
    ("great britain", "United Kingdom"),
    ("u.k.", "United Kingdom"),
    ("uk", "United Kingdom"),
    ("united kingdom", "United Kingdom"),
    ("america", "United States"),
    ("american", "United States"),
    ("u.s.a.", "United States"),
    ("united states", "United States"),
    ("united states of america", "United States"),
    ("us", "United States"),
    ("usa", "United States"),
];

/// Storefront noise that carries no genre information.
pub const IGNORED_LABELS: &[&str] = &[
    "4k",
    "bestseller",
    "dvd",
    "exclusive",
    "featured",
    "full hd",
    "hd",
    "new",
    "new release",
    "on sale",
    "sale",
    "streaming",
    "vod",
];

/// Free-text cues for genres, matched on whole words in a synopsis.
pub const SYNOPSIS_GENRES: &[(&str, &str)] = &[
    ("barracks", "Military"),
    ("beach", "Outdoors"),
    ("behind the scenes", "Behind the Scenes"),
    ("campfire", "Outdoors"),
    ("documentary", "Documentary"),
    ("interview", "Interview"),
    ("locker room", "Sports"),
    ("police", "Uniforms"),
    ("ranch", "Western"),
    ("soldier", "Military"),
    ("soldiers", "Military"),
    ("wedding", "Romance"),
];

/// Free-text cues for countries: cities and demonyms.
pub const SYNOPSIS_COUNTRIES: &[(&str, &str)] = &[
    ("amsterdam", "Netherlands"),
    ("barcelona", "Spain"),
    ("berlin", "Germany"),
    ("brazilian", "Brazil"),
    ("budapest", "Hungary"),
    ("czech", "Czech Republic"),
    ("london", "United Kingdom"),
    ("madrid", "Spain"),
    ("mexico city", "Mexico"),
    ("new york", "United States"),
    ("paris", "France"),
    ("prague", "Czech Republic"),
    ("rio de janeiro", "Brazil"),
    ("rome", "Italy"),
    ("sydney", "Australia"),
    ("tokyo", "Japan"),
    ("toronto", "Canada"),
];
