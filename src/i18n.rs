//! Label tables for the supported display languages.

use crate::models::LanguageCode;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// English (Received Pronunciation)
    En,
    Th,
    /// Irish
    Ga,
    /// Scottish Gaelic
    Gd,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Th, Language::Ga, Language::Gd];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Th => "th",
            Language::Ga => "ga",
            Language::Gd => "gd",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Th => &TH,
            Language::Ga => &GA,
            Language::Gd => &GD,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub placeholder: &'static str,
    pub add_button: &'static str,
    pub no_tasks: &'static str,
    pub clear_completed: &'static str,
    pub copy_all: &'static str,
    pub copied_message: &'static str,
    pub copy_error: &'static str,
    pub copy_generic_error: &'static str,
    pub light_mode: &'static str,
    pub dark_mode: &'static str,
    pub delete_task: &'static str,
    pub due_date: &'static str,
    pub due_time: &'static str,
}

/// Resolves a stored code to its labels, falling back to English for codes
/// outside the supported set.
pub fn labels_for(code: &LanguageCode) -> &'static Labels {
    match code.as_str().parse::<Language>() {
        Ok(lang) => lang.labels(),
        Err(e) => {
            log::warn!("{}; falling back to English labels", e);
            &EN
        }
    }
}

static EN: Labels = Labels {
    title: "Your Excellent To-Dos!",
    placeholder: "Enter a new task...",
    add_button: "Add Task! ✨",
    no_tasks: "There are no tasks at present. Kindly add one.",
    clear_completed: "Clear Completed ✅",
    copy_all: "Copy All 📋",
    copied_message: "Excellent! Tasks copied! 📋",
    copy_error: "Unable to copy. Kindly attempt again.",
    copy_generic_error: "An error occurred while copying! 😔",
    light_mode: "Switch to Light Mode",
    dark_mode: "Switch to Dark Mode",
    delete_task: "Delete task:",
    due_date: "Due Date:",
    due_time: "Due Time:",
};

static TH: Labels = Labels {
    title: "รายการสิ่งที่ต้องทำสุดเจ๋งของคุณ!",
    placeholder: "เพิ่มงานใหม่...",
    add_button: "เพิ่มเลย! ✨",
    no_tasks: "ยังไม่มีงานเลยเพื่อน! ไปทำกันเถอะ!",
    clear_completed: "ล้างงานที่เสร็จแล้ว ✅",
    copy_all: "คัดลอกทั้งหมด 📋",
    copied_message: "ยอดเยี่ยม! คัดลอกรายการแล้ว! 📋",
    copy_error: "คัดลอกไม่ได้ ลองอีกครั้งนะเพื่อน",
    copy_generic_error: "โอ้! เกิดข้อผิดพลาดในการคัดลอก! 😔",
    light_mode: "สลับไปโหมดสว่าง",
    dark_mode: "สลับไปโหมดมืด",
    delete_task: "ลบงาน:",
    due_date: "วันที่ครบกำหนด:",
    due_time: "เวลาครบกำหนด:",
};

static GA: Labels = Labels {
    title: "Na Cúraimí Pure Bril Agat!",
    placeholder: "Cuir tasc beag nua leis...",
    add_button: "Cuir Leis! ✨",
    no_tasks: "Níl aon tascanna fós, a chara! Dean é!",
    clear_completed: "Glan Comhlánaithe ✅",
    copy_all: "Cóipeáil Gach Rud 📋",
    copied_message: "Go hiontach! Cóipeáladh na cúraimí! 📋",
    copy_error: "Níorbh fhéidir a chóipeáil. Bain triail as arís, a chara.",
    copy_generic_error: "Óch, earráid cóipeála! 😔",
    light_mode: "Athraigh go Mód Solais",
    dark_mode: "Athraigh go Mód Dorcha",
    delete_task: "Scrios cúram:",
    due_date: "Dáta Dlítigh:",
    due_time: "Am Dlítigh:",
};

static GD: Labels = Labels {
    title: "Na Gnìomhan Sgoinneil agad!",
    placeholder: "Cuir gnìomh beag ùr ris...",
    add_button: "Cuir Ris! ✨",
    no_tasks: "Chan eil gnìomhan ann fhathast, a charaid! Dèan e!",
    clear_completed: "Glan Gnìomhan Crìochnaichte ✅",
    copy_all: "Dèan Lethbhreac de na h-Uile 📋",
    copied_message: "Sgoinneil! Gnìomhan air an lethbhreacadh! 📋",
    copy_error: "Cha b' urrainn lethbhreac a dhèanamh. Feuch ris a-rithist, a chàirdean.",
    copy_generic_error: "Och, mearachd lethbhreacach! 😔",
    light_mode: "Atharraich gu Modh Soilleir",
    dark_mode: "Atharraich gu Modh Dorcha",
    delete_task: "Sguab às gnìomh:",
    due_date: "Ceann-latha dlìthichte:",
    due_time: "Àm dlìthichte:",
};
