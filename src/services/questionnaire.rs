//! Questionnaire gap recommender.
//!
//! Flags categories that the supplied evaluations cover too thinly for the
//! risk at hand and proposes follow-up questions from a fixed bank.

use serde::{Deserialize, Serialize};

use crate::models::evaluation::Category;
use crate::models::risk::RiskContext;
use crate::services::insights::InsightTally;

/// Subject of a questionnaire recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireTopic {
    Access,
    Perimeter,
    Surveillance,
    Lighting,
    Training,
    Procedures,
    Incidents,
    Infrastructure,
    DataProtection,
    PersonnelSafety,
}

impl From<Category> for QuestionnaireTopic {
    fn from(category: Category) -> Self {
        match category {
            Category::Access => Self::Access,
            Category::Perimeter => Self::Perimeter,
            Category::Surveillance => Self::Surveillance,
            Category::Lighting => Self::Lighting,
            Category::Training => Self::Training,
            Category::Procedures => Self::Procedures,
            Category::Incidents => Self::Incidents,
            Category::Infrastructure => Self::Infrastructure,
        }
    }
}

/// Suggested follow-up questions for one under-covered topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionnaireRecommendation {
    pub topic: QuestionnaireTopic,
    pub reason: String,
    pub suggested_questions: Vec<String>,
}

/// Coverage rule for one category.
struct CoverageRule {
    category: Category,
    minimum: usize,
    /// Empty means always relevant.
    relevance: &'static [&'static str],
    questions: [&'static str; 5],
}

const COVERAGE_RULES: [CoverageRule; 8] = [
    CoverageRule {
        category: Category::Access,
        minimum: 2,
        relevance: &["accès", "intrusion", "vol", "serveur", "données"],
        questions: [
            "Un contrôle d'accès (badge, code, biométrie) protège-t-il les zones sensibles ?",
            "Les droits d'accès sont-ils revus au moins une fois par an ?",
            "Les accès des visiteurs sont-ils enregistrés et accompagnés ?",
            "Les badges perdus ou des personnes parties sont-ils désactivés immédiatement ?",
            "Les tentatives d'accès refusées sont-elles journalisées et analysées ?",
        ],
    },
    CoverageRule {
        category: Category::Perimeter,
        minimum: 1,
        relevance: &["intrusion", "vol", "site", "extérieur", "périmètre"],
        questions: [
            "Le site est-il entièrement ceint d'une clôture en bon état ?",
            "Les portails et barrières sont-ils fermés en dehors des heures d'ouverture ?",
            "Le périmètre est-il équipé d'une détection d'intrusion ?",
            "La végétation est-elle entretenue pour éviter les angles morts le long de la clôture ?",
            "Les points de franchissement du périmètre sont-ils inspectés régulièrement ?",
        ],
    },
    CoverageRule {
        category: Category::Surveillance,
        minimum: 2,
        relevance: &[],
        questions: [
            "Un système de vidéosurveillance couvre-t-il les accès principaux ?",
            "Les images de vidéosurveillance sont-elles conservées et consultables ?",
            "Un gardiennage ou des rondes sont-ils assurés hors des heures ouvrées ?",
            "Les alarmes sont-elles reliées à un centre de télésurveillance ?",
            "Les caméras font-elles l'objet d'une maintenance préventive ?",
        ],
    },
    CoverageRule {
        category: Category::Lighting,
        minimum: 1,
        relevance: &["intrusion", "vol", "nuit", "parking", "extérieur"],
        questions: [
            "Les abords du site bénéficient-ils d'un éclairage nocturne suffisant ?",
            "Le parking est-il éclairé sur toute sa surface ?",
            "L'éclairage extérieur est-il asservi à une détection de présence ?",
            "Les luminaires défectueux sont-ils remplacés rapidement ?",
            "Les zones de livraison sont-elles éclairées pendant les opérations ?",
        ],
    },
    CoverageRule {
        category: Category::Training,
        minimum: 1,
        relevance: &["personnel", "agression", "erreur", "humain", "formation"],
        questions: [
            "Le personnel a-t-il suivi une formation de sensibilisation à la sûreté ?",
            "Des exercices de mise en situation sont-ils organisés chaque année ?",
            "Les nouveaux arrivants reçoivent-ils une formation aux consignes de sécurité ?",
            "Le personnel sait-il à qui signaler un comportement suspect ?",
            "Les formations sont-elles tracées et renouvelées périodiquement ?",
        ],
    },
    CoverageRule {
        category: Category::Procedures,
        minimum: 2,
        relevance: &[],
        questions: [
            "Une procédure de gestion des incidents de sécurité est-elle formalisée ?",
            "Un plan d'urgence est-il rédigé et connu du personnel ?",
            "Les consignes de fermeture du site sont-elles écrites et appliquées ?",
            "Un protocole d'alerte des forces de l'ordre est-il défini ?",
            "Les procédures sont-elles revues après chaque incident ?",
        ],
    },
    CoverageRule {
        category: Category::Incidents,
        minimum: 1,
        relevance: &[],
        questions: [
            "Un incident de sécurité est-il survenu au cours des douze derniers mois ?",
            "Une intrusion a-t-elle été constatée sur le site ?",
            "Des vols ont-ils été déclarés au cours des trois dernières années ?",
            "Une agression envers le personnel a-t-elle été signalée ?",
            "Les incidents sont-ils consignés dans un registre ?",
        ],
    },
    CoverageRule {
        category: Category::Infrastructure,
        minimum: 1,
        relevance: &["bâtiment", "incendie", "inondation", "infrastructure", "local"],
        questions: [
            "Le bâtiment est-il conforme aux normes de sécurité en vigueur ?",
            "Les portes extérieures sont-elles renforcées et équipées de serrures de sûreté ?",
            "Les locaux techniques sont-ils fermés à clé ?",
            "L'infrastructure fait-elle l'objet d'inspections périodiques ?",
            "Les issues de secours sont-elles dégagées et signalées ?",
        ],
    },
];

const DATA_PROTECTION_KEYWORDS: &[&str] = &["données", "information"];
const DATA_PROTECTION_QUESTIONS: [&str; 5] = [
    "Les données sensibles sont-elles chiffrées au repos et en transit ?",
    "Des sauvegardes régulières sont-elles réalisées et testées ?",
    "Les accès aux systèmes d'information sont-ils protégés par une authentification forte ?",
    "Une politique de classification de l'information est-elle appliquée ?",
    "Les supports contenant des données sont-ils détruits de manière sécurisée ?",
];

const PERSONNEL_SAFETY_KEYWORDS: &[&str] = &["personnel", "agression"];
const PERSONNEL_SAFETY_QUESTIONS: [&str; 5] = [
    "Le personnel exposé dispose-t-il d'un moyen d'alerte rapide ?",
    "Les postes d'accueil sont-ils aménagés pour protéger les agents ?",
    "Une procédure de prise en charge après agression est-elle prévue ?",
    "Le travail isolé fait-il l'objet de mesures spécifiques ?",
    "Le personnel est-il formé à la gestion des situations conflictuelles ?",
];

/// Recommend follow-up questions for under-covered topics.
pub fn recommend(context: &RiskContext, tally: &InsightTally) -> Vec<QuestionnaireRecommendation> {
    let mut recommendations: Vec<QuestionnaireRecommendation> = COVERAGE_RULES
        .iter()
        .filter_map(|rule| coverage_gap(rule, context, tally))
        .collect();

    if context.target_mentions(DATA_PROTECTION_KEYWORDS) {
        recommendations.push(QuestionnaireRecommendation {
            topic: QuestionnaireTopic::DataProtection,
            reason: "La cible concerne des données ou de l'information : \
                     la protection des données doit être évaluée"
                .to_string(),
            suggested_questions: owned_questions(&DATA_PROTECTION_QUESTIONS),
        });
    }
    if context.target_mentions(PERSONNEL_SAFETY_KEYWORDS) {
        recommendations.push(QuestionnaireRecommendation {
            topic: QuestionnaireTopic::PersonnelSafety,
            reason: "La cible concerne le personnel : la sécurité des personnes doit être évaluée"
                .to_string(),
            suggested_questions: owned_questions(&PERSONNEL_SAFETY_QUESTIONS),
        });
    }

    tracing::debug!(
        recommendations = recommendations.len(),
        "Computed questionnaire coverage gaps"
    );

    recommendations
}

fn coverage_gap(
    rule: &CoverageRule,
    context: &RiskContext,
    tally: &InsightTally,
) -> Option<QuestionnaireRecommendation> {
    let covered = tally.answers(rule.category).len();
    if covered >= rule.minimum {
        return None;
    }
    if !rule.relevance.is_empty() && !context.mentions(rule.relevance) {
        return None;
    }

    Some(QuestionnaireRecommendation {
        topic: rule.category.into(),
        reason: format!(
            "{covered} question(s) sur le thème « {} » alors qu'au moins {} sont attendues pour ce scénario",
            rule.category.label(),
            rule.minimum
        ),
        suggested_questions: owned_questions(&rule.questions),
    })
}

fn owned_questions(questions: &[&str]) -> Vec<String> {
    questions.iter().map(|q| q.to_string()).collect()
}
