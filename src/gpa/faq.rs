use serde::Serialize;

use super::locale::Locale;

/// A canned question and answer in both languages
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    pub id: &'static str,
    /// lower-case keywords, English and Arabic
    pub keywords: &'static [&'static str],
    pub question: &'static str,
    pub question_ar: &'static str,
    pub answer: &'static str,
    pub answer_ar: &'static str,
}

pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't find an answer to that. Try asking about \
deadlines, GPA conversion, eligibility, language tests or required documents.";
pub const FALLBACK_ANSWER_AR: &str = "عذراً، لم أجد إجابة لسؤالك. جرّب السؤال عن المواعيد النهائية \
أو تحويل المعدل أو الأهلية أو اختبارات اللغة أو المستندات المطلوبة.";

pub static FAQ_ENTRIES: [FaqEntry; 9] = [
    FaqEntry {
        id: "deadlines",
        keywords: &["deadline", "due", "when", "apply by", "closing", "موعد", "آخر", "متى"],
        question: "When are scholarship application deadlines?",
        question_ar: "متى تكون المواعيد النهائية للتقديم على المنح؟",
        answer: "Every scholarship page lists its own deadline. Most fully funded programmes \
close between October and February for the following academic year.",
        answer_ar: "تعرض كل صفحة منحة موعدها النهائي الخاص. تُغلق معظم المنح الممولة بالكامل \
بين أكتوبر وفبراير للعام الدراسي التالي.",
    },
    FaqEntry {
        id: "gpa-conversion",
        keywords: &["gpa", "convert", "conversion", "grade", "scale", "معدل", "تحويل", "درجات"],
        question: "How do I convert my GPA to another grading system?",
        question_ar: "كيف أحوّل معدلي إلى نظام درجات آخر؟",
        answer: "Use the GPA converter: enter your grade and its system, and it is converted \
through a percentage to the 4.0, 5.0, letter, UK, German, French or 10-point scale.",
        answer_ar: "استخدم أداة تحويل المعدل: أدخل درجتك ونظامها وسيتم تحويلها عبر النسبة \
المئوية إلى نظام 4.0 أو 5.0 أو الحروف أو النظام البريطاني أو الألماني أو الفرنسي أو نظام العشر نقاط.",
    },
    FaqEntry {
        id: "eligibility",
        keywords: &["eligible", "eligibility", "qualify", "requirement", "minimum", "مؤهل", "أهلية", "شروط"],
        question: "Am I eligible for a scholarship?",
        question_ar: "هل أنا مؤهل للحصول على منحة؟",
        answer: "Enter your GPA in the eligibility checker. Scholarships are grouped into \
eligible, close (within 5 percentage points) and not eligible.",
        answer_ar: "أدخل معدلك في أداة فحص الأهلية. يتم تصنيف المنح إلى مؤهل، وقريب من \
الأهلية (ضمن 5 نقاط مئوية)، وغير مؤهل.",
    },
    FaqEntry {
        id: "language-tests",
        keywords: &["ielts", "toefl", "english", "language", "test", "لغة", "ايلتس", "توفل"],
        question: "Do I need IELTS or TOEFL?",
        question_ar: "هل أحتاج إلى اختبار IELTS أو TOEFL؟",
        answer: "Most programmes taught in English ask for IELTS (usually 6.5) or TOEFL iBT \
(usually 80-90). Some accept a medium-of-instruction letter instead.",
        answer_ar: "تطلب معظم البرامج التي تُدرّس بالإنجليزية اختبار IELTS (عادة 6.5) أو TOEFL \
(عادة 80-90). وتقبل بعضها خطاب لغة الدراسة بدلاً من ذلك.",
    },
    FaqEntry {
        id: "documents",
        keywords: &["document", "documents", "transcript", "recommendation", "motivation", "letter", "مستندات", "أوراق", "توصية"],
        question: "Which documents do I need to apply?",
        question_ar: "ما المستندات المطلوبة للتقديم؟",
        answer: "Typically a CV, academic transcripts, a motivation letter, two recommendation \
letters, a passport copy and a language certificate.",
        answer_ar: "عادةً: سيرة ذاتية، وكشوف الدرجات، وخطاب دافع، وخطابا توصية، ونسخة من \
جواز السفر، وشهادة اللغة.",
    },
    FaqEntry {
        id: "fully-funded",
        keywords: &["fully funded", "funded", "stipend", "tuition", "cost", "free", "ممولة", "تمويل", "راتب"],
        question: "What does a fully funded scholarship cover?",
        question_ar: "ماذا تغطي المنحة الممولة بالكامل؟",
        answer: "Fully funded scholarships cover tuition, a monthly stipend, health insurance \
and usually a return flight.",
        answer_ar: "تغطي المنح الممولة بالكامل الرسوم الدراسية وراتباً شهرياً وتأميناً صحياً \
وعادةً تذكرة طيران ذهاباً وإياباً.",
    },
    FaqEntry {
        id: "matcher",
        keywords: &["match", "matcher", "recommend", "best", "suit", "مطابقة", "أنسب", "ترشيح"],
        question: "Which scholarships suit me best?",
        question_ar: "ما المنح الأنسب لي؟",
        answer: "The scholarship matcher ranks programmes by how your GPA compares to their \
requirements, your study level and the countries you prefer.",
        answer_ar: "تقوم أداة مطابقة المنح بترتيب البرامج حسب مقارنة معدلك بمتطلباتها ومرحلتك \
الدراسية والدول التي تفضلها.",
    },
    FaqEntry {
        id: "cv-builder",
        keywords: &["cv", "resume", "résumé", "سيرة", "ذاتية"],
        question: "Can you help me write my CV?",
        question_ar: "هل يمكنكم مساعدتي في كتابة سيرتي الذاتية؟",
        answer: "Yes. The CV builder walks you through education, experience and skills and \
exports a scholarship-ready PDF.",
        answer_ar: "نعم. تساعدك أداة إنشاء السيرة الذاتية في إدخال التعليم والخبرات والمهارات \
وتصديرها كملف PDF جاهز للتقديم على المنح.",
    },
    FaqEntry {
        id: "contact",
        keywords: &["contact", "email", "support", "help", "subscribe", "newsletter", "تواصل", "اشتراك", "مساعدة"],
        question: "How can I contact the team or get updates?",
        question_ar: "كيف أتواصل مع الفريق أو أحصل على التحديثات؟",
        answer: "Use the contact form for questions, or subscribe to the newsletter to receive \
new scholarships every week.",
        answer_ar: "استخدم نموذج التواصل لطرح أسئلتك، أو اشترك في النشرة البريدية لتصلك المنح \
الجديدة كل أسبوع.",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqAnswer {
    /// `None` for the fallback answer
    pub id: Option<&'static str>,
    pub question: Option<&'static str>,
    pub answer: &'static str,
    pub locale: Locale,
    pub score: usize,
}

/// Number of `entry` keywords contained in the lower-cased query
pub fn keyword_score(entry: &FaqEntry, query: &str) -> usize {
    entry
        .keywords
        .iter()
        .filter(|keyword| query.contains(*keyword))
        .count()
}

/// Best answer for `query` in the language the query is written in
pub fn find_answer(query: &str) -> FaqAnswer {
    find_answer_in(&FAQ_ENTRIES, query, Locale::detect(query))
}

pub fn find_answer_in(entries: &'static [FaqEntry], query: &str, locale: Locale) -> FaqAnswer {
    let query = query.to_lowercase();
    let mut best: Option<(&'static FaqEntry, usize)> = None;

    for entry in entries {
        let score = keyword_score(entry, &query);
        // strict comparison keeps the first entry on ties
        if score > 0 && best.map_or(true, |(_, top)| score > top) {
            best = Some((entry, score));
        }
    }

    match best {
        Some((entry, score)) => FaqAnswer {
            id: Some(entry.id),
            question: Some(locale.pick(entry.question, entry.question_ar)),
            answer: locale.pick(entry.answer, entry.answer_ar),
            locale,
            score,
        },
        None => FaqAnswer {
            id: None,
            question: None,
            answer: locale.pick(FALLBACK_ANSWER, FALLBACK_ANSWER_AR),
            locale,
            score: 0,
        },
    }
}
