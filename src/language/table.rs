//! Built-in emoji → ISO 639-1 table
//!
//! Keys are the country/region part of Slack flag emoji (`flag-jp` → `jp`) plus
//! the short aliases Slack accepts without the `flag-` prefix (`:jp:`, `:fr:`).
//! Codes follow the Cloud Translation language list, which uses BCP-47 region
//! subtags for Chinese.

pub const DEFAULT_LANGUAGES: &[(&str, &str)] = &[
    ("ad", "ca"),
    ("ae", "ar"),
    ("af", "fa"),
    ("ag", "en"),
    ("al", "sq"),
    ("am", "hy"),
    ("ao", "pt"),
    ("ar", "es"),
    ("at", "de"),
    ("au", "en"),
    ("az", "az"),
    ("ba", "bs"),
    ("bb", "en"),
    ("bd", "bn"),
    ("be", "nl"),
    ("bf", "fr"),
    ("bg", "bg"),
    ("bh", "ar"),
    ("bi", "fr"),
    ("bj", "fr"),
    ("bn", "ms"),
    ("bo", "es"),
    ("br", "pt"),
    ("bs", "en"),
    ("bw", "en"),
    ("by", "be"),
    ("bz", "en"),
    ("ca", "en"),
    ("cd", "fr"),
    ("cf", "fr"),
    ("cg", "fr"),
    ("ch", "de"),
    ("ci", "fr"),
    ("cl", "es"),
    ("cm", "fr"),
    ("cn", "zh-CN"),
    ("co", "es"),
    ("cr", "es"),
    ("cu", "es"),
    ("cv", "pt"),
    ("cy", "el"),
    ("cz", "cs"),
    ("de", "de"),
    ("dj", "fr"),
    ("dk", "da"),
    ("dm", "en"),
    ("do", "es"),
    ("dz", "ar"),
    ("ec", "es"),
    ("ee", "et"),
    ("eg", "ar"),
    ("er", "ti"),
    ("es", "es"),
    ("et", "am"),
    ("fi", "fi"),
    ("fj", "en"),
    ("fm", "en"),
    ("fr", "fr"),
    ("ga", "fr"),
    ("gb", "en"),
    ("gd", "en"),
    ("ge", "ka"),
    ("gh", "en"),
    ("gm", "en"),
    ("gn", "fr"),
    ("gq", "es"),
    ("gr", "el"),
    ("gt", "es"),
    ("gw", "pt"),
    ("gy", "en"),
    ("hk", "zh-TW"),
    ("hn", "es"),
    ("hr", "hr"),
    ("ht", "ht"),
    ("hu", "hu"),
    ("id", "id"),
    ("ie", "en"),
    ("il", "he"),
    ("in", "hi"),
    ("iq", "ar"),
    ("ir", "fa"),
    ("is", "is"),
    ("it", "it"),
    ("jm", "en"),
    ("jo", "ar"),
    ("jp", "ja"),
    ("ke", "sw"),
    ("kg", "ky"),
    ("kh", "km"),
    ("kr", "ko"),
    ("kw", "ar"),
    ("kz", "kk"),
    ("la", "lo"),
    ("lb", "ar"),
    ("lk", "si"),
    ("lr", "en"),
    ("ls", "st"),
    ("lt", "lt"),
    ("lu", "lb"),
    ("lv", "lv"),
    ("ly", "ar"),
    ("ma", "ar"),
    ("mc", "fr"),
    ("md", "ro"),
    ("me", "sr"),
    ("mg", "mg"),
    ("mk", "mk"),
    ("ml", "fr"),
    ("mm", "my"),
    ("mn", "mn"),
    ("mo", "zh-TW"),
    ("mr", "ar"),
    ("mt", "mt"),
    ("mu", "en"),
    ("mw", "ny"),
    ("mx", "es"),
    ("my", "ms"),
    ("mz", "pt"),
    ("na", "en"),
    ("ne", "fr"),
    ("ng", "en"),
    ("ni", "es"),
    ("nl", "nl"),
    ("no", "no"),
    ("np", "ne"),
    ("nz", "en"),
    ("om", "ar"),
    ("pa", "es"),
    ("pe", "es"),
    ("pg", "en"),
    ("ph", "tl"),
    ("pk", "ur"),
    ("pl", "pl"),
    ("pr", "es"),
    ("ps", "ar"),
    ("pt", "pt"),
    ("py", "es"),
    ("qa", "ar"),
    ("ro", "ro"),
    ("rs", "sr"),
    ("ru", "ru"),
    ("rw", "rw"),
    ("sa", "ar"),
    ("sb", "en"),
    ("sc", "en"),
    ("sd", "ar"),
    ("se", "sv"),
    ("sg", "en"),
    ("si", "sl"),
    ("sk", "sk"),
    ("sl", "en"),
    ("sm", "it"),
    ("sn", "fr"),
    ("so", "so"),
    ("sr", "nl"),
    ("ss", "en"),
    ("st", "pt"),
    ("sv", "es"),
    ("sy", "ar"),
    ("sz", "en"),
    ("td", "fr"),
    ("tg", "fr"),
    ("th", "th"),
    ("tj", "tg"),
    ("tl", "pt"),
    ("tm", "tk"),
    ("tn", "ar"),
    ("to", "en"),
    ("tr", "tr"),
    ("tt", "en"),
    ("tw", "zh-TW"),
    ("tz", "sw"),
    ("ua", "uk"),
    ("ug", "en"),
    ("uk", "en"),
    ("us", "en"),
    ("uy", "es"),
    ("uz", "uz"),
    ("va", "it"),
    ("ve", "es"),
    ("vn", "vi"),
    ("vu", "en"),
    ("ws", "sm"),
    ("ye", "ar"),
    ("za", "en"),
    ("zm", "en"),
    ("zw", "en"),
    ("england", "en"),
    ("scotland", "en"),
    ("wales", "cy"),
];
