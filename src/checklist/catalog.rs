//! The built-in checklist catalog.
//!
//! The catalog maps each (grade, month) scope to its ordered default task
//! list. It is read-only: [`Catalog::lookup`] hands out deep copies so a
//! scope's mutable list can never alter the shared templates.

use super::models::{GradeLevel, Month, Task};
use super::scope::Scope;
use once_cell::sync::Lazy;
use std::collections::HashMap;

type MonthTable = &'static [(Month, &'static [&'static str])];

const NINTH: MonthTable = &[
    (
        Month::August,
        &[
            "Schedule a planning session with ICAN",
            "Attend Freshman Transition event",
            "Sign up for ICAN Tip of the Week",
            "Use a planner",
            "Talk to adults about their careers",
        ],
    ),
    (
        Month::September,
        &[
            "Join extracurriculars and track them with an activities resume",
            "Attend the Golden Circle College & Career Fair",
            "Explore career assessments",
        ],
    ),
    (
        Month::October,
        &[
            "Explore education and training options (CollegeRaptor, CTE programs, apprenticeships)",
            "Research career pathways",
        ],
    ),
    (
        Month::November,
        &[
            "Talk with parents about future plans",
            "Meet with counselor about course selection",
            "Read regularly",
            "Volunteer",
        ],
    ),
    (
        Month::December,
        &[
            "Learn computer applications (Word, Excel, etc.)",
            "Research 3 careers and related training programs",
            "Learn about financial aid options",
        ],
    ),
    (
        Month::January,
        &[
            "Explore skill-building at ICAN's career planning site",
            "Talk to parents about a college savings plan",
        ],
    ),
    (
        Month::February,
        &[
            "Research high-growth jobs and their required training",
            "Choose 10th-grade classes with counselor",
            "Identify job shadow options",
        ],
    ),
    (
        Month::March,
        &[
            "Find summer camps in your area of interest",
            "Keep GPA strong",
            "Attend the Future Ready Career & College Fair",
        ],
    ),
    (
        Month::April,
        &[
            "Talk to seniors about their planning process",
            "Visit a college campus or take a virtual tour",
            "Build relationships for future recommendations",
        ],
    ),
    (
        Month::May,
        &[
            "Job shadow, volunteer, or intern",
            "Start a summer reading list",
            "Learn about athletic requirements if you want to play sports",
        ],
    ),
    (
        Month::June,
        &[
            "Attend a summer camp on a college campus (if applicable)",
            "Create an activities resume",
            "Talk to adults about their career choices",
        ],
    ),
    (
        Month::July,
        &[
            "Review career assessment and explore matching colleges",
            "Join hobbies tied to career interests",
            "Stay open to changing goals",
        ],
    ),
];

const TENTH: MonthTable = &[
    (
        Month::August,
        &[
            "Visit ICAN Center for career/college planning",
            "Sign up for ICAN Tip of the Week",
            "Find a mentor",
            "Attend career planning events",
        ],
    ),
    (
        Month::September,
        &[
            "Attend Golden Circle Fair",
            "Register for PreACT or PSAT/NMSQT",
            "Sign up for job shadows",
            "Join school/community activities",
        ],
    ),
    (
        Month::October,
        &[
            "Compare careers and research job characteristics",
            "Attend a college fair",
            "Take/update career assessment",
        ],
    ),
    (
        Month::November,
        &[
            "Discuss admission requirements with counselor",
            "Explore tuition and financial aid options",
            "Talk to adults about their careers",
        ],
    ),
    (
        Month::December,
        &[
            "Meet college reps/career speakers",
            "Schedule advising with ICAN",
            "Learn about alternate education options",
            "Volunteer over winter break",
        ],
    ),
    (
        Month::January,
        &[
            "Keep track of extracurriculars in your activities resume",
            "Review types of financial aid",
            "Review financial plan for post-high school",
        ],
    ),
    (
        Month::February,
        &[
            "Attend ICAN planning nights",
            "Confirm junior year classes align with your career path",
            "Explore career pathways using MyACT",
        ],
    ),
    (
        Month::March,
        &[
            "Consider AP classes",
            "Attend ICAN Future Ready Fair",
            "Talk to professionals in your field of interest",
            "Tour colleges if on vacation",
        ],
    ),
    (
        Month::April,
        &[
            "Review college financial plan",
            "Explore scholarships and savings strategies",
            "Gain experience via job shadowing or internships",
            "Use ROCI Tool to compare career ROI",
        ],
    ),
    (
        Month::May,
        &[
            "Check status of savings plans",
            "Ask counselor about summer programs",
            "Look for summer jobs related to your interests",
        ],
    ),
    (
        Month::June,
        &[
            "Keep reading over the summer",
            "Join hobbies that develop career interests",
            "Learn about athletic eligibility",
        ],
    ),
    (
        Month::July,
        &[
            "Tour college campuses during camp visits",
            "Talk to parents about cost planning",
            "Maintain connections for future recommendations",
        ],
    ),
];

const ELEVENTH: MonthTable = &[
    (
        Month::August,
        &[
            "Sign up for ICAN Tip of the Week",
            "Learn about college fairs/events",
            "Keep GPA up",
            "Review/start a savings plan",
            "Take a career assessment",
            "Talk to parents about careers",
        ],
    ),
    (
        Month::September,
        &[
            "Attend the Golden Circle College & Career Fair",
            "Register for the PSAT/NMSQT",
            "Explore military and apprenticeship options",
            "Schedule ICAN planning session",
        ],
    ),
    (
        Month::October,
        &[
            "Attend college/career fairs",
            "Explore Iowa colleges",
            "Talk with your counselor about admission readiness",
        ],
    ),
    (
        Month::November,
        &[
            "Review college brochures",
            "Make a list of 10\u{2013}15 colleges",
            "Download the College Checklist",
            "Start SAT/ACT planning",
            "Research scholarships",
        ],
    ),
    (
        Month::December,
        &[
            "Register for January SAT or February ACT",
            "Meet with college reps/career speakers",
            "Use CollegeRaptor.com to compare colleges",
            "Schedule planning with ICAN",
        ],
    ),
    (
        Month::January,
        &[
            "Register for March SAT",
            "Attend a financial aid seminar",
            "Plan campus visits based on 'No School' days",
        ],
    ),
    (
        Month::February,
        &[
            "Create an education/training budget (use ROCI tool)",
            "Choose senior classes aligned with your career path",
            "Register for April ACT",
            "Talk about AP/CLEP/honors courses",
        ],
    ),
    (
        Month::March,
        &[
            "Attend the ICAN Future Ready Fair",
            "Schedule visits to colleges/apprenticeships",
            "Register for May SAT",
        ],
    ),
    (
        Month::April,
        &[
            "Consider summer college courses",
            "Plan for AP exams",
            "Compare/rank colleges",
            "Register for June ACT/SAT",
            "Update activities resume",
        ],
    ),
    (
        Month::May,
        &[
            "Narrow top college/apprenticeship choices",
            "Take AP exams",
            "Get a career-related summer job",
            "Update resume/portfolio",
        ],
    ),
    (
        Month::June,
        &[
            "Schedule final campus visits",
            "Start private scholarship applications",
            "Save money for college",
            "Review athletic requirements (if applicable)",
        ],
    ),
    (
        Month::July,
        &[
            "Review admission applications",
            "Choose recommendation writers",
            "Create a spending plan with parents",
        ],
    ),
];

const TWELFTH: MonthTable = &[
    (
        Month::August,
        &[
            "Sign up for ICAN Senior Alerts",
            "Gather info on admissions, scholarships, aid",
            "Talk to admissions reps about retesting SAT/ACT",
            "Register for tests",
        ],
    ),
    (
        Month::September,
        &[
            "Create a StudentAid.gov account",
            "Schedule ICAN college/career planning session",
            "Begin application essays and recommendation requests",
            "Update activities resume",
        ],
    ),
    (
        Month::October,
        &[
            "Review FAFSA priority dates",
            "Schedule FAFSA completion appointment",
            "Submit admissions and scholarship apps by Nov 1",
            "Research military benefits",
        ],
    ),
    (
        Month::November,
        &[
            "Finalize and submit applications",
            "Start free scholarship searches",
            "Set up StudentAid.gov account (if not done)",
            "Register for December ACT",
        ],
    ),
    (
        Month::December,
        &[
            "Save copies of submitted forms",
            "Check with counselor on local/state scholarships",
            "Monitor for acceptance letters",
            "Submit FAFSA before earliest deadline",
        ],
    ),
    (
        Month::January,
        &[
            "Review FAFSA submission and aid plans with ICAN",
            "Maintain strong grades",
            "Verify if additional aid forms are needed",
            "Send updated transcript and housing apps",
        ],
    ),
    (
        Month::February,
        &[
            "Review FAFSA Summary",
            "Submit missing financial forms",
            "Meet with ICAN advisor to compare aid packages",
            "Review college budget with family",
        ],
    ),
    (
        Month::March,
        &[
            "Use College Funding Forecaster",
            "Prepare for May 1 Decision Day",
            "Notify other colleges if not attending",
            "Complete loan paperwork",
        ],
    ),
    (
        Month::April,
        &[
            "Take AP/CLEP exams",
            "Finalize summer job",
            "Submit final transcript",
            "Return all documents to your college",
            "Notify college of scholarships",
        ],
    ),
    (
        Month::May,
        &[
            "Confirm tools/certifications for apprenticeships",
            "Create/review budget with parents",
            "Attend orientation",
        ],
    ),
    (
        Month::June,
        &["Use ICAN's Packing List", "Coordinate with roommate", "Thank your support network"],
    ),
    (Month::July, &["Renew FAFSA for following year"]),
];

/// The process-wide built-in catalog.
static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let tables = [
        (GradeLevel::Ninth, NINTH),
        (GradeLevel::Tenth, TENTH),
        (GradeLevel::Eleventh, ELEVENTH),
        (GradeLevel::Twelfth, TWELFTH),
    ];
    Catalog::from_entries(tables.into_iter().flat_map(|(grade, table)| {
        table.iter().map(move |(month, texts)| {
            let tasks = texts
                .iter()
                .enumerate()
                .map(|(i, text)| Task::new((i + 1).to_string(), *text))
                .collect();
            (Scope::new(grade, *month), tasks)
        })
    }))
});

/// Static mapping from scope to its default task list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<Scope, Vec<Task>>,
}

impl Catalog {
    /// The built-in catalog, constructed once on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a catalog from explicit entries.
    ///
    /// Entries with an empty task list are dropped: an absent scope and an
    /// empty one are indistinguishable to callers. Every task is stored with
    /// `done = false`. A later entry for the same scope replaces an earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = (Scope, Vec<Task>)>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|(_, tasks)| !tasks.is_empty())
            .map(|(scope, tasks)| {
                let tasks = tasks.into_iter().map(|task| Task { done: false, ..task }).collect();
                (scope, tasks)
            })
            .collect();
        Self { entries }
    }

    /// Get a fresh copy of the default task list for a scope.
    ///
    /// Returns an empty list when the catalog has no entry for the scope.
    #[must_use]
    pub fn lookup(&self, scope: Scope) -> Vec<Task> {
        self.templates(scope).to_vec()
    }

    /// Borrow the default task list for a scope without copying it.
    #[must_use]
    pub fn templates(&self, scope: Scope) -> &[Task] {
        self.entries.get(&scope).map_or(&[], Vec::as_slice)
    }

    /// Number of default tasks for a scope.
    #[must_use]
    pub fn task_count(&self, scope: Scope) -> usize {
        self.templates(scope).len()
    }

    /// Whether the catalog has an entry for a scope.
    #[must_use]
    pub fn contains(&self, scope: Scope) -> bool {
        self.entries.contains_key(&scope)
    }

    /// All populated scopes, ordered by grade and then school-year month.
    #[must_use]
    pub fn scopes(&self) -> Vec<Scope> {
        let mut scopes: Vec<Scope> = self.entries.keys().copied().collect();
        scopes.sort_by_key(|scope| (scope.grade, scope.month.school_year_index()));
        scopes
    }

    /// Number of populated scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no populated scopes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(grade: GradeLevel, month: Month) -> Scope {
        Scope::new(grade, month)
    }

    #[test]
    fn test_builtin_covers_every_grade_and_month() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 48);
        for grade in GradeLevel::ALL {
            for month in Month::ALL {
                assert!(
                    !catalog.lookup(scope(grade, month)).is_empty(),
                    "missing tasks for {grade} {month}"
                );
            }
        }
    }

    #[test]
    fn test_ninth_august_has_five_tasks() {
        let tasks = Catalog::builtin().lookup(scope(GradeLevel::Ninth, Month::August));
        assert_eq!(tasks.len(), 5);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
        assert_eq!(tasks[0].text, "Schedule a planning session with ICAN");
        assert!(tasks.iter().all(|t| !t.done));
    }

    #[test]
    fn test_twelfth_july_has_one_task() {
        let tasks = Catalog::builtin().lookup(scope(GradeLevel::Twelfth, Month::July));
        assert_eq!(tasks, vec![Task::new("1", "Renew FAFSA for following year")]);
    }

    #[test]
    fn test_lookup_is_order_stable() {
        let catalog = Catalog::builtin();
        let s = scope(GradeLevel::Eleventh, Month::April);
        assert_eq!(catalog.lookup(s), catalog.lookup(s));
    }

    #[test]
    fn test_ids_are_unique_within_each_scope() {
        let catalog = Catalog::builtin();
        for s in catalog.scopes() {
            let tasks = catalog.templates(s);
            let mut ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), tasks.len(), "duplicate ids in {s}");
        }
    }

    #[test]
    fn test_lookup_returns_a_copy() {
        let catalog = Catalog::builtin();
        let s = scope(GradeLevel::Tenth, Month::May);
        let mut copy = catalog.lookup(s);
        copy[0].done = true;
        copy[0].text = "changed".to_string();
        assert!(!catalog.templates(s)[0].done);
        assert_ne!(catalog.templates(s)[0].text, "changed");
    }

    #[test]
    fn test_absent_scope_is_empty() {
        let catalog = Catalog::from_entries([(
            scope(GradeLevel::Ninth, Month::August),
            vec![Task::new("1", "Only task")],
        )]);
        assert!(catalog.lookup(scope(GradeLevel::Twelfth, Month::March)).is_empty());
        assert_eq!(catalog.task_count(scope(GradeLevel::Twelfth, Month::March)), 0);
        assert!(!catalog.contains(scope(GradeLevel::Twelfth, Month::March)));
    }

    #[test]
    fn test_from_entries_drops_empty_lists_and_clears_done() {
        let mut done = Task::new("1", "Already done");
        done.done = true;
        let catalog = Catalog::from_entries([
            (scope(GradeLevel::Ninth, Month::May), vec![]),
            (scope(GradeLevel::Ninth, Month::June), vec![done]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains(scope(GradeLevel::Ninth, Month::May)));
        assert!(!catalog.templates(scope(GradeLevel::Ninth, Month::June))[0].done);
    }

    #[test]
    fn test_scopes_ordered_by_grade_then_school_year() {
        let scopes = Catalog::builtin().scopes();
        assert_eq!(scopes[0], scope(GradeLevel::Ninth, Month::August));
        assert_eq!(scopes[11], scope(GradeLevel::Ninth, Month::July));
        assert_eq!(scopes[12], scope(GradeLevel::Tenth, Month::August));
        assert_eq!(scopes[47], scope(GradeLevel::Twelfth, Month::July));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.scopes().is_empty());
    }
}
