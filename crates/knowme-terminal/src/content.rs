//! Static portfolio content printed by the profile commands.
//!
//! Only text lives here so the command bodies stay about behavior.

pub const ABOUT_LINES: &[&str] = &[
    "Hi, I'm Adarsh Chauhan (he/him).",
    "Building with computers, growing through books, and capturing life one photo and lesson at a time.",
];

pub const WORK_LINES: &[&str] = &[
    "- Google | Bengaluru + Seattle | Senior Software Engineer | May 2020 - present",
    "  ",
    "  Led backend for global identity and collaboration products. Shipped security and group management features used by millions.",
    "  • Designed and launched data residency and privacy systems for enterprise customers.",
    "  • Re-architected backend flows to cut latency for users worldwide (recognized with internal awards).",
    "  • Drove cross-team launches from concept to GA, including phased rollouts and technical alignment.",
    "  • Mentored engineers and set code quality standards, especially in Java readability and backend reliability.",
    "  • Built custom monitoring and test frameworks to improve reliability and oncall experience.",
    "  ",
    "- Intel Labs | Bengaluru | Research Scientist | Aug 2016 - May 2020",
    "  ",
    "  Invented new processor core features and instruction set extensions for next-gen CPUs.",
    "  • Created hardware decompression logic for ultra-fast data access inside the core.",
    "  • Developed auto-predication and dynamic branch prediction techniques for smarter pipelines.",
    "  • Integrated algorithms with micro-architecture to optimize control flow and caching.",
    "  • Authored multiple granted patents and published research papers in computer architecture.",
    "  • Collaborated with global teams to take research from concept to silicon.",
    "  ",
    "Out in the world: https://www.linkedin.com/in/dyno8426/",
    "  ",
    "Tip: Try `publications` to see my side-missions originating from work.",
    "[Last updated: September 19, 2025]",
];

pub const PUBLICATIONS_LINES: &[&str] = &[
    "Select Publications & Patents:",
    "  ",
    "* Auto-predication of critical branches",
    "    • Published in ACM/IEEE 47th Annual International Symposium on Computer Architecture.",
    "* Automatic predication of hard-to-predict convergent branches",
    "    • US Patent 10,754,655",
    "* Instruction and micro-architecture support for decompression on core",
    "    • US Patents 12,182,018 and 12,028,094",
    "* Technology for dynamically tuning processor features",
    "    • US Patents 10,915,421, 11,656,971, and 11,256,599",
    "* Detecting a dynamic control flow re-convergence point for conditional branches in hardware",
    "    • US Patent 11,645,078",
    "  ",
    "Out in the world: https://scholar.google.com/citations?hl=en&user=PDupuQ0AAAAJ",
    "  ",
    "Tip: Try `acads` to continue my story before work.",
    "[Last updated: September 19, 2025]",
];

pub const ACADS_LINES: &[&str] = &[
    "- Master of Science (M.S.) in Computer Science",
    "  Indian Institute of Technology, Kanpur (July 2015 – June 2016)",
    "  ",
    "  Specialized in Image Classification using Actively Learned CNNs.",
    "  Thesis: Implemented and fine-tuned a CNN for image classification, applying architectures trained on ImageNet.",
    "  Developed and evaluated Active Learning models to improve training efficiency over state-of-the-art methods.",
    "  ",
    "- Bachelor of Technology (B.Tech.) in Computer Science",
    "  Indian Institute of Technology, Kanpur (July 2011 – June 2015)",
    "  ",
    "  Completed core curriculum: Specialized Computer Science and Engineering courses, Physics, Mathematics, Engineering Sciences.",
    "  Focused on professional courses and project work in final two years, with a wide range of electives to customize the curriculum.",
    "  ",
    "Tip: Try `interests` to continue my story beyond acads and work.",
    "[Last updated: September 19, 2025]",
];

pub const INTERESTS_READING: &[&str] = &[
    "📖 Reading: I was introduced to English literature in my college years and it soon became my favorite, go-to hobby. The tools of literary analysis changed how I interact with books, from consumption to engagement. Fiction makes up most of my reading because it represents artistic expression to me, both in words and in ideas. Readers live several lives, and I stand by it: books share different textures of human experience and are a perfect source of intellectual stimulation.",
    "  I keep sending some of my thoughts about books out in the world sporadically. If you mean to read any of the books shared there, please reach out. :)",
    "  Try `open https://goodreads.com/dyno8426` for my reading list, `open https://dyno8426.substack.com` if you are feeling lucky, or `open https://app.thestorygraph.com/profile/dyno8426` for reading stats.",
];

pub const INTERESTS_PHOTOGRAPHY: &[&str] = &[
    "📷 Photography: An art form I appreciate for its accessibility and universality, thanks to tech putting good cameras in every hand. I love to capture visual textures, the ones that make up the everyday, visually rich environment around us without us noticing their contribution. I stand by the popular quote that 'the best camera is the one you have with you'.",
    "  Some favourite shots are public: try `open http://unsplash.com/@dyno8426` or `open https://www.instagram.com/dyno8426/`.",
];

pub const INTERESTS_ART: &[&str] = &[
    "🖼️ Art: My mind-opening experience with art came through introductory courses in college. It unlocked \"the ways of seeing\" for me: what to see in art, what art is trying to do, and what to value in it. Art challenges the conventions of seeing and materializes the fresh, weird vision of the artist, with as much purpose in its form as in its ideas.",
    "  \"We don't read and write poetry because it's cute. We read and write poetry because we are members of the human race.\" (Dead Poets Society)",
];

pub const INTERESTS_MUSIC: &[&str] = &[
    "🎼 Music: If I had to define my taste in one word, it would be \"eclectic\": classic rock from the 1970s, chart-topping pop, classical symphonies, offbeat indie folk and rock, and overlooked background scores. Jazz is probably my least favourite, simply because it is too improvisational for me. On shuffle, always!",
    "  My entire library is a public Spotify playlist: try `open https://open.spotify.com/playlist/0613v454UflcYzBqXnGAsy`.",
];

pub const INTERESTS_MISC: &[&str] = &[
    "Then come the miscellaneous hobbies I am trying to mature into habits.",
    "🎲 Board games: entertaining and a wholesome opportunity to be competitive, creative and connecting. \"7 Wonders\" stood out as my favourite.",
    "💪️ Strength training: sweat out those active calories and exercise the keep-pushing-on attitude.",
    "🍹 Mixology: crafting mocktails and finding match-made-in-heaven flavour combinations.",
    "🪴 Gardening: a perfect way to intentionally slow down and a metaphor for working on what you care about, every day.",
    "♟ Chess: the most recent addition. I am only a beginner, but I really enjoy watching games and analyses.",
];

pub const INTERESTS_HELP: &[&str] = &[
    "Usage: interests [all|reading|photography|art|music|misc]",
    "Options:",
    "  all          Show all hobbies",
    "  reading      About reading/books",
    "  photography  About photography",
    "  art          About art",
    "  music        About music",
    "  misc         Miscellaneous hobbies (board games, strength, mixology, gardening, chess)",
    "",
    "Type \"interests all\" to see everything or \"interests reading\" for just reading.",
];

pub const PROJECTS_LINES: &[&str] = &[
    "- dyno8426-cli:",
    "  This very project! A terminal-style personal website inspired by retro computer aesthetics and command-line interfaces. Features dynamic backgrounds, theme switching, and a variety of commands to explore my work experience and non-work interests.",
    "  ",
    "  It started as an experiment in building with genAI agents as collaborators: the tool still needs someone who knows its limits and when not to use the sword to cut a sheet of paper.",
    "  ",
    "  Github link: https://github.com/dyno8426/dyno8426-cli",
];

pub const BOOKS_LINES: &[&str] = &[
    "Use the 'booksuggestion' command to get a random book recommendation from my Goodreads read shelf.",
];

pub const PHOTOS_LINES: &[&str] = &[
    "Use the 'photosuggestion' command to get a random photo suggestion from my Unsplash account.",
];

pub const CONTACT_LINES: &[&str] = &[
    "Email               : dyno8426@gmail.com",
    "LinkedIn            : https://linkedin.com/in/dyno8426",
    "GitHub              : https://github.com/dyno8426",
    "Twitter             : https://twitter.com/dyno8426",
    "Substack            : https://dyno8426.substack.com",
    "Instagram           : https://instagram.com/dyno8426",
    "Google Scholar      : https://scholar.google.com/citations?hl=en&user=PDupuQ0AAAAJ",
    "Goodreads           : https://goodreads.com/dyno8426",
    "StoryGraph          : https://app.thestorygraph.com/profile/dyno8426",
    "Unsplash            : http://unsplash.com/@dyno8426",
    "Spotify             : https://open.spotify.com/user/31ijg2wfzfzfn6wt5jg7qiihewy4",
    "Board Game Arena    : https://boardgamearena.com/player?id=88473419",
];

pub const SUDO_HIRE_ME_LINES: &[&str] = &[
    "Permission granted ✅",
    "Attaching resume ✅",
    "Download PDF ⬇️ : /resources/AC_CV_Dec2022.pdf",
];

/// Quote printed under the banner art.
pub const BANNER_QUOTE: &str = "Upward, not Northward";

pub const BANNER_ART: &str = r#"
                            .-""""""""""""-.
                         .-'                '-.
                       .'                      '.
                      /                          \
                     ;                            ;
                     |                       .::::|
                     |                    .:::::::|
                     |                      ':::::|
                     ;                            ;
                      \                          /
                       '.                      .'
                         '-.__________________.-'

                ._______________________________________________.
               /                                               /
              /           .-~~~~~~~~~~~~~~~~~~~~~~~~~-.        /
             /          .'                           '.      /
            /          (                             )      /
           /            '.                         .'        /
          /_________________________________________________/

          "Upward, not Northward"
          — Edwin Abbott Abbott, Flatland: A Romance of Many Dimensions
"#;

/// Copy a static table into owned output lines.
pub fn to_lines(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| (*s).to_string()).collect()
}
