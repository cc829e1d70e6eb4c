use crate::models::CatalogEntry;

/// Courses seeded by "populate", in insertion order.
pub const COURSE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry { code: "BIOT502", name: "Botanical Zool. Field Trips" },
    CatalogEntry { code: "BIOT502", name: "Organic Chemistry III (Macromolecular Chemistry)" },
    CatalogEntry { code: "BIOT503", name: "Physical Chemistry II (Electrochemistry)" },
    CatalogEntry { code: "BIOT631", name: "Genetics & Genetic Engineering I" },
    CatalogEntry { code: "BIOT641", name: "Cell Biology" },
    CatalogEntry { code: "BIOT651", name: "Introduction to Biosafety" },
    CatalogEntry { code: "BIOT681", name: "Bioinformatics" },
    CatalogEntry { code: "BIOT691", name: "Technical Chemistry & Process Engineering" },
    CatalogEntry { code: "BIOT711", name: "Microbiology II (Microbiology & Immunology)" },
    CatalogEntry { code: "BIOT732", name: "Genetics & Genetic Engineering II" },
    CatalogEntry { code: "BIOT751", name: "Radionuclides" },
    CatalogEntry { code: "BIOT861", name: "Industrial Biotechnology" },
    CatalogEntry { code: "BIOT891", name: "Fermentation Technology" },
    CatalogEntry { code: "BIOT899", name: "Bachelor Thesis" },
    CatalogEntry { code: "CHEM 102", name: "Engineering Chemistry" },
    CatalogEntry { code: "CHEMt 102 / CHEMp 102", name: "Chemistry" },
    CatalogEntry { code: "ELCT801", name: "Electronics" },
    CatalogEntry { code: "PHBC521", name: "Biochemistry & Biochemical Analytical Methods" },
    CatalogEntry { code: "PHBC621", name: "Clinical Biochemistry" },
    CatalogEntry { code: "PHBL101", name: "Biology I" },
    CatalogEntry { code: "PHBL202", name: "Biology II" },
    CatalogEntry { code: "PHBL303", name: "Pharmacognosy I" },
    CatalogEntry { code: "PHBL511", name: "Pharmacognosy II" },
    CatalogEntry { code: "PHBL621", name: "Phytochemistry I" },
    CatalogEntry { code: "PHBL722", name: "Phytochemistry II" },
    CatalogEntry { code: "PHBL731", name: "Medicinal Plants/Marine Excusrions" },
    CatalogEntry { code: "PHBL831", name: "Phytotherapy & Biogenic Drugs" },
    CatalogEntry { code: "PHBT091", name: "Fermentation Technology" },
    CatalogEntry { code: "PHBT601", name: "Introduction to Biotechnology" },
    CatalogEntry { code: "PHCM081", name: "Drug Design" },
    CatalogEntry { code: "PHCM101", name: "General & Inorganic Analytical Chemistry I" },
    CatalogEntry { code: "PHCM223", name: "Pharmaceutical Analytical Chemistry II" },
    CatalogEntry { code: "PHCM331", name: "Organic & Medicinal/Pharmaceutical Chemistry I" },
    CatalogEntry { code: "PHCM341", name: "Physical Chemistry" },
    CatalogEntry { code: "PHCM432", name: "Organic & Medicinal/Pharmaceutical Chemistry II" },
    CatalogEntry { code: "PHCM561", name: "Introduction to Instrumental Analysis" },
    CatalogEntry { code: "PHCM571", name: "Pharmaceutical Chemistry I" },
    CatalogEntry { code: "PHCM662", name: "Instrumental Analysis" },
    CatalogEntry { code: "PHCM672", name: "Pharmaceutical Chemistry II" },
    CatalogEntry { code: "PHCM773", name: "Pharmaceutical Chemistry III" },
    CatalogEntry { code: "PHCM874", name: "Pharmaceutical Chemistry IV" },
    CatalogEntry { code: "PHMB401", name: "General & Pharmaceutical Microbiology" },
    CatalogEntry { code: "PHMB911", name: "Microbiology II (Immunology, vaccines, sera)" },
    CatalogEntry { code: "PHTC051", name: "Legislation of Pharmacy Laws" },
    CatalogEntry { code: "PHTC061", name: "Pharmacy Management" },
    CatalogEntry { code: "PHTC201", name: "History of Pharmacy & Biotechnology" },
    CatalogEntry { code: "PHTC311", name: "Pharmaceutics I (Orientation & Physical Pharmacy)" },
    CatalogEntry { code: "PHTC411", name: "Pharmaceutics II (Drug Dosage Forms)" },
    CatalogEntry { code: "PHTC521", name: "Biopharmacy & Dosage Form Kinetics" },
    CatalogEntry { code: "PHTC732", name: "Pharmaceutical Technology I" },
    CatalogEntry { code: "PHTC833", name: "Pharmaceutical Technology II" },
    CatalogEntry { code: "PHTC934", name: "Pharmaceutical Technology III" },
    CatalogEntry { code: "PHTC941", name: "Quality Assurance" },
    CatalogEntry { code: "PHTX051", name: "Pharmacoepidemiology & Economy" },
    CatalogEntry { code: "PHTX062", name: "Clinical Pharmacy II" },
    CatalogEntry { code: "PHTX071", name: "Pharmacotherapeutics" },
    CatalogEntry { code: "PHTX211", name: "Pharmaceutical & Medical Terminology" },
    CatalogEntry { code: "PHTX301", name: "Physiology & Anatomy I" },
    CatalogEntry { code: "PHTX402", name: "Physiology & Anatomy II" },
    CatalogEntry { code: "PHTX621", name: "Pathology & Histology" },
    CatalogEntry { code: "PHTX731", name: "Pathophysiology & Pathobiochemistry" },
    CatalogEntry { code: "PHTX831", name: "Toxicology I" },
    CatalogEntry { code: "PHTX841", name: "Pharmacology I" },
    CatalogEntry { code: "PHTX942", name: "Pharmacology II" },
    CatalogEntry { code: "PHTX943", name: "Toxicology II" },
    CatalogEntry { code: "PHTX944", name: "First Aid" },
    CatalogEntry { code: "PHTX961", name: "Clinical Pharmacy I" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCourse;

    #[test]
    fn test_catalog_is_populated() {
        assert_eq!(COURSE_CATALOG.len(), 67);
        assert!(COURSE_CATALOG.iter().all(|c| !c.code.is_empty() && !c.name.is_empty()));
    }

    #[test]
    fn test_catalog_keeps_duplicate_codes() {
        let biot502 = COURSE_CATALOG.iter().filter(|c| c.code == "BIOT502").count();
        assert_eq!(biot502, 2);
    }

    #[test]
    fn test_toxicology_entry_builds_expected_record() {
        let entry = COURSE_CATALOG
            .iter()
            .find(|c| c.code == "PHTX831")
            .expect("PHTX831 in catalog");
        let course = NewCourse::from(entry);
        assert_eq!(course.name, "Toxicology I");
        assert_eq!(course.description, "This is the Toxicology I course with code PHTX831.");
        assert_eq!(course.category, "PHTX831");
    }
}
