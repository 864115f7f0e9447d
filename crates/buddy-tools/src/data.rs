//! Static company data tables: FAQ entries, mission and values, product
//! overview, and per-role onboarding checklists. Immutable at runtime.

/// One curated FAQ entry.
#[derive(Debug, Clone, Copy)]
pub struct FaqEntry {
    pub id: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

pub const FAQS: &[FaqEntry] = &[
    FaqEntry {
        id: "company-mission",
        question: "What is Meridian's mission?",
        answer: "Meridian's mission is to help distributed teams do their best work together. \
We build tools that make collaboration transparent, asynchronous, and humane.",
        category: "company",
        keywords: &["mission", "meridian", "purpose", "goal"],
    },
    FaqEntry {
        id: "company-values",
        question: "What are Meridian's core values?",
        answer: "Our core values:\n\
1. Default to openness - decisions and context are written down and shared\n\
2. Customers before roadmaps - user problems drive what we build\n\
3. Ownership - take initiative and see things through\n\
4. Kindness and candor - direct feedback, delivered with care\n\
5. Keep learning - we grow together and fund each other's development",
        category: "company",
        keywords: &["values", "principles", "culture", "beliefs"],
    },
    FaqEntry {
        id: "company-culture",
        question: "What is the culture like at Meridian?",
        answer: "Meridian is remote-first and async-friendly. Autonomy and ownership are valued, \
wins are celebrated together, and failures are treated as things to learn from. \
Weekly written updates keep everyone aligned, and work-life balance is taken seriously.",
        category: "company",
        keywords: &["culture", "environment", "remote", "team", "work-life"],
    },
    FaqEntry {
        id: "product-overview",
        question: "What is Atlas?",
        answer: "Atlas is Meridian's flagship product: a shared workspace where teams plan, \
document, and track work in one place. It connects documents, tasks, and discussions \
so context never gets lost between tools.",
        category: "product",
        keywords: &["atlas", "product", "platform", "workspace"],
    },
    FaqEntry {
        id: "product-tech-stack",
        question: "What technology does Atlas use?",
        answer: "Atlas is built on:\n\
- Frontend: TypeScript, React\n\
- Backend: Rust services behind a GraphQL gateway\n\
- Data: PostgreSQL, Redis\n\
- Infrastructure: AWS, Kubernetes, Terraform",
        category: "product",
        keywords: &["tech", "technology", "stack", "built", "languages"],
    },
    FaqEntry {
        id: "policy-pto",
        question: "How do I request time off or PTO?",
        answer: "To request time off:\n\
1. Submit the request in the HR system at least two weeks ahead for planned leave\n\
2. Let your team know and note it in your status\n\
3. Delegate anything critical before you go\n\
For emergencies, message your manager directly.",
        category: "policies",
        keywords: &["pto", "vacation", "time off", "leave", "holiday"],
    },
    FaqEntry {
        id: "policy-expenses",
        question: "How does expense reimbursement work?",
        answer: "Submit receipts through the expenses tool within 30 days of purchase. \
Anything under the monthly equipment budget is pre-approved; larger purchases need a \
manager sign-off first. Reimbursements land with the next payroll run.",
        category: "policies",
        keywords: &["expense", "reimbursement", "receipt", "budget", "purchase"],
    },
    FaqEntry {
        id: "tools-access",
        question: "How do I get access to the tools I need?",
        answer: "Your IT onboarding ticket covers the standard set (email, chat, the wiki, \
and the code host). Role-specific systems are requested through the access portal; \
your manager approves them, usually within a day.",
        category: "tools",
        keywords: &["access", "account", "login", "permissions", "github"],
    },
    FaqEntry {
        id: "channels-to-join",
        question: "Which chat channels should I join?",
        answer: "Everyone joins #general, #announcements, and #ask-anything. \
Then add your team channel and anything that matches your interests - \
#atlas-dev and #atlas-product for the product teams, plus social channels.",
        category: "channels",
        keywords: &["channels", "chat", "slack", "join"],
    },
    FaqEntry {
        id: "firstweek-expectations",
        question: "What should I focus on in my first week?",
        answer: "Week one is about orientation, not output: meet your team and your \
onboarding buddy, get your environment working, read the team charter, and pick up \
one small starter task. Ask questions early and often - nobody expects you to know \
things yet.",
        category: "firstweek",
        keywords: &["first week", "start", "onboarding", "new", "begin"],
    },
    FaqEntry {
        id: "benefits-overview",
        question: "What benefits does Meridian offer?",
        answer: "Core benefits include private health cover, a pension plan with employer \
matching, an annual learning budget, and a home-office stipend. Details and enrollment \
are in the HR portal under Benefits.",
        category: "benefits",
        keywords: &["benefits", "health", "pension", "insurance", "perks"],
    },
];

/// Company mission, values, and ways of working, as one formatted block.
pub fn mission_and_values() -> &'static str {
    "Meridian - Mission & Values\n\
\n\
Mission: help distributed teams do their best work together, with tools that make \
collaboration transparent, asynchronous, and humane.\n\
\n\
Core values:\n\
1. Default to openness - decisions and context are written down and shared\n\
2. Customers before roadmaps - user problems drive what we build\n\
3. Ownership - take initiative and see things through\n\
4. Kindness and candor - direct feedback, delivered with care\n\
5. Keep learning - we grow together and fund each other's development\n\
\n\
Ways of working:\n\
- Remote-first: work from anywhere, collaborate asynchronously\n\
- Written culture: decisions live in documents, not meetings\n\
- Weekly updates: every team posts progress in #announcements\n\
- Regular 1:1s: meet your manager weekly or bi-weekly"
}

/// Product description, features, and related channels, as one block.
pub fn product_overview() -> &'static str {
    "Atlas - Product Overview\n\
\n\
Atlas is Meridian's flagship product: a shared workspace where teams plan, document, \
and track work in one place.\n\
\n\
Key capabilities:\n\
- Linked documents, tasks, and discussions with shared context\n\
- Project views: boards, timelines, and progress rollups\n\
- Deep search across everything a team has written\n\
- Integrations with the code host, calendar, and chat\n\
\n\
Tech stack: TypeScript/React frontend, Rust services behind a GraphQL gateway, \
PostgreSQL and Redis, deployed on AWS with Kubernetes.\n\
\n\
Channels: #atlas-dev for engineering, #atlas-product for roadmap discussions, \
#atlas-support for customer issues."
}

/// A role with a curated onboarding checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Developer,
    Product,
    Design,
    Marketing,
    Operations,
    Other,
}

impl Role {
    /// Parse a free-form role string; anything unrecognized becomes `Other`.
    pub fn parse(role: &str) -> Self {
        match role.trim().to_lowercase().as_str() {
            "developer" | "engineer" | "engineering" | "dev" => Self::Developer,
            "product" | "pm" => Self::Product,
            "design" | "designer" => Self::Design,
            "marketing" => Self::Marketing,
            "operations" | "ops" | "hr" => Self::Operations,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Product => "product",
            Self::Design => "design",
            Self::Marketing => "marketing",
            Self::Operations => "operations",
            Self::Other => "other",
        }
    }
}

/// One onboarding checklist item.
#[derive(Debug, Clone, Copy)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const COMMON_ITEMS: &[ChecklistItem] = &[
    ChecklistItem {
        id: "read-handbook",
        title: "Read the company handbook",
        description: "Skim the handbook to understand the mission, how teams are structured, \
and where decisions get written down.",
    },
    ChecklistItem {
        id: "join-channels",
        title: "Join the core chat channels",
        description: "At minimum: #general, #announcements, #ask-anything, and your team channel.",
    },
    ChecklistItem {
        id: "meet-buddy",
        title: "Meet your onboarding buddy and manager",
        description: "Your buddy is the go-to for day-to-day questions; your manager sets up \
your first 1:1 cadence.",
    },
];

const DEVELOPER_ITEMS: &[ChecklistItem] = &[
    ChecklistItem {
        id: "dev-env-setup",
        title: "Set up your local development environment",
        description: "Clone the main repository, install dependencies, and run the test suite. \
Ask in #atlas-dev if you get stuck.",
    },
    ChecklistItem {
        id: "access-core-tools",
        title: "Confirm access to the code host and issue tracker",
        description: "Make sure you can push a branch and see your team's board.",
    },
    ChecklistItem {
        id: "first-small-change",
        title: "Ship a small change",
        description: "Pick a starter issue with your buddy and get one change through review \
and deploy in your first week.",
    },
];

const PRODUCT_ITEMS: &[ChecklistItem] = &[
    ChecklistItem {
        id: "read-roadmap",
        title: "Read the current roadmap and recent decision docs",
        description: "The product wiki links every active initiative and its context.",
    },
    ChecklistItem {
        id: "shadow-calls",
        title: "Shadow two customer calls",
        description: "Ask in #atlas-product for upcoming calls you can sit in on.",
    },
];

const DESIGN_ITEMS: &[ChecklistItem] = &[
    ChecklistItem {
        id: "design-system",
        title: "Tour the design system",
        description: "Get access to the shared component library and read its contribution guide.",
    },
    ChecklistItem {
        id: "review-flows",
        title: "Review the core product flows",
        description: "Walk the onboarding, planning, and search flows end to end and note rough edges.",
    },
];

const MARKETING_ITEMS: &[ChecklistItem] = &[
    ChecklistItem {
        id: "brand-guide",
        title: "Read the brand and voice guide",
        description: "Covers tone, naming, and the visual identity rules.",
    },
    ChecklistItem {
        id: "channel-overview",
        title: "Review active campaigns and channels",
        description: "The marketing wiki lists what is live, what is planned, and who owns what.",
    },
];

const OPERATIONS_ITEMS: &[ChecklistItem] = &[
    ChecklistItem {
        id: "systems-overview",
        title: "Get access to the HR and finance systems",
        description: "Your IT ticket covers the basics; request the rest through the access portal.",
    },
    ChecklistItem {
        id: "process-docs",
        title: "Read the operations runbooks",
        description: "Payroll, onboarding, and procurement processes are documented in the ops wiki.",
    },
];

/// Checklist items for a role: the common set plus role-specific ones.
pub fn role_checklist(role: Role) -> Vec<ChecklistItem> {
    let specific: &[ChecklistItem] = match role {
        Role::Developer => DEVELOPER_ITEMS,
        Role::Product => PRODUCT_ITEMS,
        Role::Design => DESIGN_ITEMS,
        Role::Marketing => MARKETING_ITEMS,
        Role::Operations => OPERATIONS_ITEMS,
        Role::Other => &[],
    };
    COMMON_ITEMS.iter().chain(specific.iter()).copied().collect()
}

/// Format a role's checklist as numbered plain text.
pub fn format_checklist(role: Role) -> String {
    let items = role_checklist(role);
    let mut out = format!("Onboarding checklist ({}):\n\n", role.as_str());
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n   {}\n", i + 1, item.title, item.description));
    }
    out
}
