use crate::timetable::DepartmentCode;

/// Requesting this code scrapes every department in the catalog.
pub const ALL_DEPARTMENTS: &str = "all";

/// Subject codes offered on the Vancouver campus timetable.
pub const KNOWN_DEPARTMENTS: &[&str] = &[
    "AANB", "ACAM", "ADHE", "AFST", "AGEC", "ANAT", "ANTH", "APBI", "APPP", "APSC", "ARBC",
    "ARC", "ARCH", "ARCL", "ARST", "ARTE", "ARTH", "ARTS", "ASIA", "ASIC", "ASL", "ASTR",
    "ASTU", "ATSC", "AUDI", "BA", "BAAC", "BABS", "BAEN", "BAFI", "BAHC", "BAHR", "BAIM",
    "BALA", "BAMA", "BAMS", "BAPA", "BASC", "BASD", "BASM", "BATL", "BATM", "BAUL", "BIOC",
    "BIOF", "BIOL", "BIOT", "BMEG", "BOTA", "BRDG", "BUSI", "CAPS", "CCFI", "CCST", "CDST",
    "CEEN", "CELL", "CENS", "CHBE", "CHEM", "CHIL", "CHIN", "CICS", "CIVL", "CLCH", "CLST",
    "CNPS", "CNRS", "CNTO", "COEC", "COGS", "COHR", "COMM", "CONS", "CPEN", "CPSC", "CRWR",
    "CSIS", "CSPW", "DANI", "DENT", "DERM", "DES", "DHYG", "DMED", "DPAS", "ECED", "ECON",
    "EDCP", "EDST", "EDUC", "EECE", "ELEC", "ELI", "EMBA", "EMER", "ENDS", "ENGL", "ENPH",
    "ENVR", "EOSC", "EPSE", "ETEC", "EXCH", "EXGR", "FACT", "FEBC", "FHIS", "FIPR", "FISH",
    "FIST", "FMED", "FMPR", "FMST", "FNEL", "FNH", "FNIS", "FOOD", "FOPR", "FRE", "FREN",
    "FRSI", "FRST", "GBPR", "GEM", "GENE", "GEOG", "GEOS", "GERM", "GPP", "GREK", "GRS",
    "GRSJ", "GSAT", "HEBR", "HESO", "HGSE", "HINU", "HIST", "HPB", "HUNU", "IAR", "IEST",
    "IGEN", "INDO", "INFO", "ISCI", "ITAL", "ITST", "IWME", "JAPN", "JRNL", "KIN", "KORN",
    "LAIS", "LARC", "LASO", "LAST", "LATN", "LAW", "LFS", "LIBE", "LIBR", "LING", "LLED",
    "LWS", "MATH", "MDVL", "MECH", "MEDG", "MEDI", "MGMT", "MICB", "MIDW", "MINE", "MRNE",
    "MTRL", "MUSC", "NAME", "NEPL", "NEST", "NRSC", "NURS", "OBST", "OHS", "ONCO", "OPTH",
    "ORBI", "ORNT", "ORPA", "OSOT", "PAED", "PATH", "PCTH", "PERS", "PHAR", "PHIL", "PHRM",
    "PHTH", "PHYL", "PHYS", "PLAN", "PLNT", "POLI", "POLS", "PORT", "PPGA", "PSYC", "PSYT",
    "PUNJ", "RADI", "RELG", "RES", "RGLA", "RHSC", "RMES", "RMST", "RSOT", "RUSS", "SANS",
    "SCAN", "SCIE", "SEAL", "SLAV", "SOAL", "SOCI", "SOIL", "SOWK", "SPAN", "SPHA", "SPPH",
    "STAT", "STS", "SURG", "SWED", "TEST", "THTR", "TIBT", "TRSC", "UDES", "UFOR", "UKRN",
    "URDU", "URO", "URST", "URSY", "VANT", "VGRD", "VISA", "VRHC", "VURS", "WOOD", "WRDS",
    "WRIT", "ZOOL",
];

/// Resolves the departments a run should visit.
///
/// Codes are upper-cased and de-duplicated, keeping first-seen order. The
/// `all` sentinel is replaced in place by `known_catalog`.
pub fn expand_departments<S: AsRef<str>>(
    requested: &[S],
    known_catalog: &[&str],
) -> Vec<DepartmentCode> {
    let mut expanded: Vec<DepartmentCode> = Vec::new();
    let mut push = |code: &str| {
        let code = code.trim().to_ascii_uppercase();
        if !code.is_empty() && !expanded.contains(&code) {
            expanded.push(code);
        }
    };

    for code in requested {
        let code = code.as_ref();
        if code.trim().eq_ignore_ascii_case(ALL_DEPARTMENTS) {
            for known in known_catalog.iter().copied() {
                push(known);
            }
        } else {
            push(code);
        }
    }
    expanded
}
