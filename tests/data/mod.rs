use rand::{distributions::Alphanumeric, seq::SliceRandom, Rng};

pub const BASIC_EXAMPLE_PATHS: &[&str] = &[
    "dummy.dds",
    "textures/armor/amuletsandrings/elder council/elder_council_amulet_n.dds",
    "meshes/armor/cuirass.nif",
    "meshes/characters/_male/idle.kf",
    "sound/fx/hit.wav",
    "sound/voice/skyrim.esm/maleuniquedbguardian/darkbrotherhood__0007469a_1.fuz",
    "interface/fontconfig.txt",
    "readme",
    ".gitignore",
    "a.dds",
];

pub const FLAGGED_EXTENSIONS: &[&str] = &["kf", "nif", "dds", "wav"];
pub const UNFLAGGED_EXTENSIONS: &[&str] = &["txt", "fuz", "png", "xml", "esp", "lip"];

fn random_segment(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(1..16);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random ascii paths made of one to four segments, without an extension.
pub fn generate_stems(count: usize) -> impl Iterator<Item = String> {
    let mut rng = rand::thread_rng();

    (0..count).map(move |_| {
        let segments = rng.gen_range(1..=4);
        (0..segments)
            .map(|_| random_segment(&mut rng))
            .collect::<Vec<_>>()
            .join(if rng.gen() { "/" } else { "\\" })
    })
}

/// Random paths ending in one of `extensions`.
pub fn generate_paths<'a>(
    count: usize,
    extensions: &'a [&'a str],
) -> impl Iterator<Item = String> + 'a {
    let mut rng = rand::thread_rng();

    generate_stems(count).map(move |stem| {
        let extension = extensions.choose(&mut rng).copied().unwrap_or_default();
        format!("{stem}.{extension}")
    })
}

/// Randomly flips the case of ascii letters and swaps separators.
pub fn scramble(path: &str) -> String {
    let mut rng = rand::thread_rng();

    path.chars()
        .map(|c| match c {
            '/' if rng.gen() => '\\',
            '\\' if rng.gen() => '/',
            c if rng.gen() => c.to_ascii_uppercase(),
            c => c,
        })
        .collect()
}
