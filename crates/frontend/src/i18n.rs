use meem_shared::Locale;

/// Every fixed UI string the branch pages show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    SiteTitle,
    NavHome,
    NavBranches,
    NavOffers,
    SwitchLanguage,
    HeroTitle,
    HeroSubtitle,
    ChooseLocation,
    BranchesTitle,
    BranchesSubtitle,
    LocationsHeading,
    SelectBranch,
    NoLocationSelected,
    NoBranchesAvailable,
    LoadingBranches,
    DataUnavailable,
    Retry,
    LoadingMap,
    MapUnavailable,
    NoCoordinates,
    Phone,
    Hours,
    ShowBranches,
    HideBranches,
    Back,
    Close,
    Step,
    StepChooseBranch,
    StepChooseAction,
    ActionMapTitle,
    ActionMapDescription,
    ActionContactTitle,
    ActionContactDescription,
    ActionOffersTitle,
    ActionOffersDescription,
    BranchLocation,
    BranchNoCoordinates,
    ContactInfo,
    FollowUs,
    OffersTitle,
    OffersForBranch,
    OffersForAll,
    FindBranch,
    NotFoundTitle,
    NotFoundBody,
    BackHome,
    ErrorTitle,
    ErrorBody,
    Reload,
}

pub fn t(locale: Locale, key: Text) -> &'static str {
    let (en, ar) = match key {
        Text::SiteTitle => ("Meem Market", "ميم ماركت"),
        Text::NavHome => ("Home", "الرئيسية"),
        Text::NavBranches => ("Branches", "الفروع"),
        Text::NavOffers => ("Offers", "العروض"),
        Text::SwitchLanguage => ("العربية", "English"),
        Text::HeroTitle => (
            "Fresh every day, close to you",
            "طازج كل يوم، وقريب منك",
        ),
        Text::HeroSubtitle => (
            "Pick your country to find the nearest Meem Market branch.",
            "اختر دولتك للعثور على أقرب فرع لميم ماركت.",
        ),
        Text::ChooseLocation => ("Choose your location", "اختر موقعك"),
        Text::BranchesTitle => ("Our Branches", "فروعنا"),
        Text::BranchesSubtitle => (
            "Find a Meem Market near you",
            "ابحث عن ميم ماركت بالقرب منك",
        ),
        Text::LocationsHeading => ("Location", "الموقع"),
        Text::SelectBranch => ("Select a branch", "اختر الفرع"),
        Text::NoLocationSelected => (
            "Select a location to see its branches",
            "اختر موقعًا لعرض فروعه",
        ),
        Text::NoBranchesAvailable => (
            "No branches available in this location",
            "لا توجد فروع متاحة في هذا الموقع",
        ),
        Text::LoadingBranches => ("Loading branches…", "جارٍ تحميل الفروع…"),
        Text::DataUnavailable => (
            "We couldn't load the branch list.",
            "تعذر تحميل قائمة الفروع.",
        ),
        Text::Retry => ("Retry", "إعادة المحاولة"),
        Text::LoadingMap => ("Loading map…", "جارٍ تحميل الخريطة…"),
        Text::MapUnavailable => ("Unable to load map", "تعذر تحميل الخريطة"),
        Text::NoCoordinates => (
            "No branches with coordinates available",
            "لا توجد فروع بإحداثيات متاحة",
        ),
        Text::Phone => ("Phone: ", "الهاتف: "),
        Text::Hours => ("Hours: ", "ساعات العمل: "),
        Text::ShowBranches => ("Show branches", "عرض الفروع"),
        Text::HideBranches => ("Hide branches", "إخفاء الفروع"),
        Text::Back => ("Go back", "رجوع"),
        Text::Close => ("Close", "إغلاق"),
        Text::Step => ("Step", "الخطوة"),
        Text::StepChooseBranch => ("Choose branch", "اختر الفرع"),
        Text::StepChooseAction => ("Choose action", "اختر الإجراء"),
        Text::ActionMapTitle => ("View on map", "عرض على الخريطة"),
        Text::ActionMapDescription => (
            "See where this branch is",
            "تعرف على موقع هذا الفرع",
        ),
        Text::ActionContactTitle => ("Contact us", "تواصل معنا"),
        Text::ActionContactDescription => (
            "Phone, opening hours and social media",
            "الهاتف وساعات العمل ووسائل التواصل",
        ),
        Text::ActionOffersTitle => ("Browse offers", "تصفح العروض"),
        Text::ActionOffersDescription => (
            "Current deals at this branch",
            "العروض الحالية في هذا الفرع",
        ),
        Text::BranchLocation => ("Branch location", "موقع الفرع"),
        Text::BranchNoCoordinates => (
            "Map location is not available for this branch yet.",
            "موقع الفرع على الخريطة غير متوفر حاليًا.",
        ),
        Text::ContactInfo => ("Contact information", "معلومات التواصل"),
        Text::FollowUs => ("Follow us", "تابعنا"),
        Text::OffersTitle => ("Offers", "العروض"),
        Text::OffersForBranch => ("Showing offers for", "عرض العروض الخاصة بـ"),
        Text::OffersForAll => (
            "Showing offers from all branches",
            "عرض العروض من جميع الفروع",
        ),
        Text::FindBranch => ("Find a branch", "ابحث عن فرع"),
        Text::NotFoundTitle => ("404 - Page Not Found", "404 - الصفحة غير موجودة"),
        Text::NotFoundBody => (
            "The page you are looking for doesn't exist or has been moved.",
            "الصفحة التي تبحث عنها غير موجودة أو تم نقلها.",
        ),
        Text::BackHome => ("Return Home", "العودة للرئيسية"),
        Text::ErrorTitle => ("Something went wrong", "حدث خطأ ما"),
        Text::ErrorBody => (
            "An unexpected error occurred. Please try again.",
            "حدث خطأ غير متوقع. يرجى المحاولة مرة أخرى.",
        ),
        Text::Reload => ("Reload page", "إعادة تحميل الصفحة"),
    };
    match locale {
        Locale::En => en,
        Locale::Ar => ar,
    }
}

/// Locale from the first path segment, falling back to English. Used where
/// no route has been matched yet.
pub fn locale_from_path(path: &str) -> Locale {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_follows_locale() {
        assert_eq!(t(Locale::En, Text::Retry), "Retry");
        assert_eq!(t(Locale::Ar, Text::Retry), "إعادة المحاولة");
    }

    #[test]
    fn test_language_switch_names_the_other_language() {
        assert_eq!(t(Locale::En, Text::SwitchLanguage), "العربية");
        assert_eq!(t(Locale::Ar, Text::SwitchLanguage), "English");
    }

    #[test]
    fn test_locale_from_path() {
        assert_eq!(locale_from_path("/ar/branches"), Locale::Ar);
        assert_eq!(locale_from_path("/en"), Locale::En);
        assert_eq!(locale_from_path("/"), Locale::En);
        assert_eq!(locale_from_path("/fr/offers"), Locale::En);
    }
}
